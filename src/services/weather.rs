//! Weather client (api.weatherapi.com) and message formatting.

use serde::Deserialize;

use crate::core::config;
use crate::core::error::{AppError, AppResult};

#[derive(Debug, Clone, Deserialize)]
pub struct WeatherResponse {
    pub location: Location,
    pub current: Current,
    pub forecast: Forecast,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Location {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Current {
    pub temp_c: f64,
    pub condition: Condition,
    pub wind_kph: f64,
    pub humidity: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Condition {
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Forecast {
    pub forecastday: Vec<ForecastDay>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastDay {
    pub date: String,
    pub day: Day,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Day {
    pub maxtemp_c: f64,
    pub mintemp_c: f64,
    pub condition: Condition,
}

/// Translates a weatherapi condition label to Russian. Unknown labels pass
/// through unchanged.
pub fn condition_ru(text: &str) -> &str {
    match text {
        "Sunny" => "Солнечно",
        "Clear" => "Ясно",
        "Partly cloudy" => "Переменная облачность",
        "Cloudy" => "Облачно",
        "Overcast" => "Пасмурно",
        "Mist" => "Туман",
        "Patchy rain possible" => "Возможен небольшой дождь",
        "Patchy snow possible" => "Возможен небольшой снег",
        "Patchy sleet possible" => "Возможен небольшой дождь со снегом",
        "Patchy freezing drizzle possible" => "Возможен небольшой ледяной дождь",
        "Thundery outbreaks possible" => "Возможны грозы",
        "Blowing snow" => "Метель",
        "Blizzard" => "Сильная метель",
        "Fog" => "Густой туман",
        "Freezing fog" => "Ледяной туман",
        "Light drizzle" => "Лёгкая морось",
        "Heavy rain" => "Сильный дождь",
        "Light rain" => "Лёгкий дождь",
        "Moderate rain" => "Умеренный дождь",
        "Heavy snow" => "Сильный снег",
        "Light snow" => "Лёгкий снег",
        "Moderate snow" => "Умеренный снег",
        "Light rain shower" => "Лёгкий ливень",
        "Moderate or heavy rain shower" => "Умеренный или сильный ливень",
        "Light snow showers" => "Лёгкие снежные осадки",
        "Moderate or heavy snow showers" => "Умеренные или сильные снежные осадки",
        "Ice pellets" => "Ледяные гранулы",
        "Rain" => "Дождь",
        "Snow" => "Снег",
        "Sleet" => "Дождь со снегом",
        "Patchy rain nearby" => "Небольшой дождь поблизости",
        other => other,
    }
}

/// Validates the city the user typed: non-empty, letters/spaces/hyphens only.
pub fn validate_city(city: &str) -> AppResult<&str> {
    let city = city.trim();
    if city.is_empty() {
        return Err(AppError::Validation(
            "Вы не ввели город. Пожалуйста, введите название города.".to_string(),
        ));
    }
    if !city.chars().all(|c| c.is_alphabetic() || c == ' ' || c == '-' || c == '—') {
        return Err(AppError::Validation(
            "Название города может содержать только буквы, пробелы или дефисы.".to_string(),
        ));
    }
    Ok(city)
}

/// Current conditions block.
pub fn format_current(weather: &WeatherResponse) -> String {
    let current = &weather.current;
    format!(
        "Погода в {} сейчас:\n\n\
         🌡️Температура - {}°C\n\n\
         🔅Состояние - {}\n\n\
         🪁Ветер - {} км/ч\n\n\
         🌧️Влажность - {}%",
        weather.location.name,
        current.temp_c,
        condition_ru(&current.condition.text),
        current.wind_kph,
        current.humidity
    )
}

/// Forecast block for the following days; `None` when the response carries
/// nothing beyond today (today is already covered by the current-conditions
/// message).
pub fn format_forecast(weather: &WeatherResponse) -> Option<String> {
    if weather.forecast.forecastday.len() <= 1 {
        return None;
    }
    let mut text = "Прогноз на следующие дни:\n".to_string();
    for day in weather.forecast.forecastday.iter().skip(1) {
        text.push_str(&format!(
            "🗓️{}:\n🌡️Температура -> {}°C - {}°C\n🔅Состояние -> {}\n\n",
            day.date,
            day.day.mintemp_c,
            day.day.maxtemp_c,
            condition_ru(&day.day.condition.text)
        ));
    }
    Some(text)
}

/// Client for the forecast endpoint.
pub struct WeatherClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl WeatherClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> AppResult<Self> {
        let http = reqwest::Client::builder().timeout(config::network::timeout()).build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            token: token.into(),
        })
    }

    pub fn from_env() -> AppResult<Self> {
        Self::new(config::api::WEATHER_API_BASE.clone(), config::WEATHER_TOKEN.clone())
    }

    /// 3-day forecast for a city.
    pub async fn fetch(&self, city: &str) -> AppResult<WeatherResponse> {
        let url = format!("{}/forecast.json", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[("key", self.token.as_str()), ("q", city), ("days", "3"), ("aqi", "yes")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::HttpStatus(response.status()));
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> WeatherResponse {
        serde_json::from_str(
            r#"{
                "location": {"name": "Kyiv"},
                "current": {"temp_c": 21.5, "condition": {"text": "Sunny"}, "wind_kph": 12.0, "humidity": 40},
                "forecast": {"forecastday": [
                    {"date": "2024-05-01", "day": {"maxtemp_c": 23.0, "mintemp_c": 12.0, "condition": {"text": "Sunny"}}},
                    {"date": "2024-05-02", "day": {"maxtemp_c": 20.0, "mintemp_c": 11.0, "condition": {"text": "Light rain"}}},
                    {"date": "2024-05-03", "day": {"maxtemp_c": 18.0, "mintemp_c": 9.0, "condition": {"text": "Overcast"}}}
                ]}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_condition_translation() {
        assert_eq!(condition_ru("Sunny"), "Солнечно");
        assert_eq!(condition_ru("Blizzard"), "Сильная метель");
        // Unknown labels pass through so new upstream values stay readable.
        assert_eq!(condition_ru("Volcanic ash"), "Volcanic ash");
    }

    #[test]
    fn test_format_current() {
        let text = format_current(&sample());
        assert!(text.contains("Погода в Kyiv сейчас"));
        assert!(text.contains("21.5°C"));
        assert!(text.contains("Солнечно"));
        assert!(text.contains("40%"));
    }

    #[test]
    fn test_format_forecast_skips_today() {
        let text = format_forecast(&sample()).unwrap();
        assert!(!text.contains("2024-05-01"));
        assert!(text.contains("2024-05-02"));
        assert!(text.contains("2024-05-03"));
        assert!(text.contains("Лёгкий дождь"));
    }

    #[test]
    fn test_format_forecast_none_without_upcoming_days() {
        let mut weather = sample();
        weather.forecast.forecastday.truncate(1);
        assert_eq!(format_forecast(&weather), None);

        weather.forecast.forecastday.clear();
        assert_eq!(format_forecast(&weather), None);
    }

    #[test]
    fn test_validate_city() {
        assert_eq!(validate_city("  Kyiv ").unwrap(), "Kyiv");
        assert_eq!(validate_city("Кривий Ріг").unwrap(), "Кривий Ріг");
        assert!(validate_city("").is_err());
        assert!(validate_city("Kyiv3000").is_err());
    }
}
