use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

const OUTPUT_PATH: &str = "dashboard/all_data.csv";
const DAYS: usize = 90;

const MONTH_LENGTHS: [usize; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
const HOLIDAYS: [usize; 2] = [16, 50]; // day offsets from 2011-01-01

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn weather_label(weathersit: u8) -> &'static str {
    match weathersit {
        1 => "Cerah/Sedikit Berawan",
        2 => "Berkabut/Berawan",
        3 => "Hujan/Salju Ringan",
        _ => "Hujan/Salju Lebat",
    }
}

/// `2011-MM-DD` for a day offset within 2011.
fn date_string(mut day: usize) -> String {
    let mut month = 0;
    while day >= MONTH_LENGTHS[month] {
        day -= MONTH_LENGTHS[month];
        month += 1;
    }
    format!("2011-{:02}-{:02}", month + 1, day + 1)
}

fn season(day: usize) -> u8 {
    match day {
        0..=78 => 1,
        79..=170 => 2,
        171..=265 => 3,
        _ => 4,
    }
}

/// Typical share of the day's riders per hour for each user type.
fn hourly_profile(hour: usize, working_day: bool) -> (f64, f64) {
    let h = hour as f64;
    let bump = |center: f64, width: f64| (-(h - center).powi(2) / (2.0 * width * width)).exp();
    let casual = 0.1 + 1.2 * bump(14.0, 3.5);
    let registered = if working_day {
        0.15 + 2.5 * bump(8.0, 1.0) + 2.8 * bump(17.5, 1.3) + 0.6 * bump(12.5, 2.0)
    } else {
        0.1 + 1.4 * bump(13.0, 3.5)
    };
    (casual, registered)
}

struct HourRow {
    hour: usize,
    weathersit: u8,
    temp: f64,
    hum: f64,
    windspeed: f64,
    casual: u32,
    registered: u32,
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let path = Path::new(OUTPUT_PATH);
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("creating {OUTPUT_PATH}"))?;

    writer.write_record([
        "instant",
        "dteday",
        "season_day",
        "holiday_day",
        "weekday_day",
        "workingday_day",
        "weathersit_day",
        "temp_day",
        "hum_day",
        "casual_day",
        "registered_day",
        "cnt_day",
        "hr",
        "weathersit_hour",
        "temp_hour",
        "hum_hour",
        "windspeed_hour",
        "casual_hour",
        "registered_hour",
        "cnt_hour",
        "weather_label",
    ])?;

    let mut instant = 0;
    for day in 0..DAYS {
        // 2011-01-01 was a Saturday; 0 = Sunday.
        let weekday = (6 + day) % 7;
        let holiday = HOLIDAYS.contains(&day);
        let working_day = (1..=5).contains(&weekday) && !holiday;

        let day_weather: u8 = match rng.next_f64() {
            p if p < 0.6 => 1,
            p if p < 0.9 => 2,
            _ => 3,
        };
        let day_temp = (0.25 + day as f64 / DAYS as f64 * 0.3 + rng.gauss(0.0, 0.05)).clamp(0.02, 1.0);
        let day_hum = (0.6 + rng.gauss(0.0, 0.1)).clamp(0.1, 1.0);
        let demand = 40.0 + 160.0 * day_temp;

        let hours: Vec<HourRow> = (0..24)
            .map(|hour| {
                let weathersit = if rng.next_f64() < 0.15 {
                    (day_weather + 1).min(4)
                } else {
                    day_weather
                };
                let weather_factor = match weathersit {
                    1 => 1.0,
                    2 => 0.8,
                    3 => 0.45,
                    _ => 0.2,
                };
                let (casual_share, registered_share) = hourly_profile(hour, working_day);
                let casual_scale = if working_day { 0.25 } else { 0.9 };
                let noisy = |rng: &mut SimpleRng, mean: f64| {
                    rng.gauss(mean, mean * 0.15).round().max(0.0) as u32
                };

                HourRow {
                    hour,
                    weathersit,
                    temp: (day_temp + rng.gauss(0.0, 0.03)).clamp(0.02, 1.0),
                    hum: (day_hum + rng.gauss(0.0, 0.05)).clamp(0.1, 1.0),
                    windspeed: rng.next_f64() * 0.4,
                    casual: noisy(&mut rng, demand * casual_scale * casual_share * weather_factor),
                    registered: noisy(&mut rng, demand * registered_share * weather_factor),
                }
            })
            .collect();

        let casual_day: u32 = hours.iter().map(|h| h.casual).sum();
        let registered_day: u32 = hours.iter().map(|h| h.registered).sum();
        let date = date_string(day);

        for h in &hours {
            instant += 1;
            writer.write_record([
                instant.to_string(),
                date.clone(),
                season(day).to_string(),
                u8::from(holiday).to_string(),
                weekday.to_string(),
                u8::from(working_day).to_string(),
                day_weather.to_string(),
                format!("{day_temp:.4}"),
                format!("{day_hum:.4}"),
                casual_day.to_string(),
                registered_day.to_string(),
                (casual_day + registered_day).to_string(),
                h.hour.to_string(),
                h.weathersit.to_string(),
                format!("{:.4}", h.temp),
                format!("{:.4}", h.hum),
                format!("{:.4}", h.windspeed),
                h.casual.to_string(),
                h.registered.to_string(),
                (h.casual + h.registered).to_string(),
                weather_label(h.weathersit).to_string(),
            ])?;
        }
    }

    writer.flush().context("flushing CSV")?;
    println!("Wrote {instant} hourly rows ({DAYS} days) to {OUTPUT_PATH}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_roll_over_months() {
        assert_eq!(date_string(0), "2011-01-01");
        assert_eq!(date_string(31), "2011-02-01");
        assert_eq!(date_string(58), "2011-02-28");
        assert_eq!(date_string(59), "2011-03-01");
    }

    #[test]
    fn rng_is_deterministic() {
        let mut a = SimpleRng::new(7);
        let mut b = SimpleRng::new(7);
        for _ in 0..10 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
        let x = a.next_f64();
        assert!((0.0..1.0).contains(&x));
    }

    #[test]
    fn working_day_profile_peaks_at_commute_hours() {
        let (_, morning) = hourly_profile(8, true);
        let (_, night) = hourly_profile(3, true);
        assert!(morning > night * 5.0);
    }
}
