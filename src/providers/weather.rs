//! OpenWeatherMap current conditions

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::{WeatherProvider, WeatherReport};
use crate::{Error, Result};

const WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// `OpenWeatherMap` current weather response (metric units)
#[derive(Debug, Deserialize)]
struct WeatherResponse {
    main: MainReadings,
    wind: WindReadings,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    temp: f64,
    pressure: f64,
}

#[derive(Debug, Deserialize)]
struct WindReadings {
    speed: f64,
}

impl From<WeatherResponse> for WeatherReport {
    fn from(r: WeatherResponse) -> Self {
        Self {
            temperature_c: r.main.temp,
            wind_speed: r.wind.speed,
            pressure_hpa: r.main.pressure,
        }
    }
}

/// `OpenWeatherMap` client
pub struct OpenWeatherMap {
    client: reqwest::Client,
    api_key: Option<SecretString>,
}

impl OpenWeatherMap {
    /// Create a client; lookups fail until a key is configured
    #[must_use]
    pub fn new(api_key: Option<SecretString>) -> Self {
        if api_key.is_none() {
            tracing::warn!("WEATHER_API_KEY not set, weather lookups will fail");
        }
        Self {
            client: reqwest::Client::new(),
            api_key,
        }
    }
}

#[async_trait(?Send)]
impl WeatherProvider for OpenWeatherMap {
    async fn current_weather(&self, city: &str) -> Result<WeatherReport> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| Error::Weather("WEATHER_API_KEY is not configured".to_string()))?;

        tracing::debug!(city, "fetching weather");

        let response = self
            .client
            .get(WEATHER_URL)
            .query(&[
                ("q", city),
                ("appid", api_key.expose_secret()),
                ("units", "metric"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Weather(format!("OpenWeatherMap error {status}: {body}")));
        }

        let weather: WeatherResponse = response.json().await?;
        Ok(weather.into())
    }
}
