//! Current weather report

use async_trait::async_trait;

use super::{Handler, Outcome, Services};
use crate::Result;
use crate::context::AssistantContext;

/// Speaks the current weather for a named city or the home city
pub struct WeatherForecast;

#[async_trait(?Send)]
impl Handler for WeatherForecast {
    async fn handle(
        &self,
        args: &[String],
        ctx: &mut AssistantContext,
        services: &mut Services,
    ) -> Result<Outcome> {
        let city = args
            .first()
            .cloned()
            .unwrap_or_else(|| ctx.user.home_city.clone());

        let report = services.weather.current_weather(&city).await?;
        let pressure = report.pressure_mm_hg();

        tracing::info!(
            city = %city,
            wind_speed_m_s = report.wind_speed,
            temperature_c = report.temperature_c,
            pressure_mm_hg = pressure,
            "weather report"
        );

        services
            .say_phrase(ctx, "Weather information in {}", &[&city])
            .await?;
        services
            .say_phrase(
                ctx,
                "The wind speed is {} meters per second",
                &[&report.wind_speed.to_string()],
            )
            .await?;
        services
            .say_phrase(
                ctx,
                "The temperature is {} degrees Celsius",
                &[&report.temperature_c.to_string()],
            )
            .await?;
        services
            .say_phrase(ctx, "The pressure is {} mm Hg", &[&pressure.to_string()])
            .await?;

        Ok(Outcome::Continue)
    }
}
