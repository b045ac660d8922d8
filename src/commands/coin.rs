//! Coin toss

use async_trait::async_trait;
use rand::Rng;

use super::{Handler, Outcome, Services};
use crate::Result;
use crate::context::AssistantContext;

/// Flips per toss
pub const DEFAULT_FLIPS: u32 = 8;

/// Winning side of a toss
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoinSide {
    /// Heads won (also on a tie)
    Heads,
    /// Tails won
    Tails,
}

impl CoinSide {
    /// Phrase table key for this side
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Heads => "heads",
            Self::Tails => "tails",
        }
    }
}

/// Flip a fair coin `flips` times; the side with more flips wins, ties go to heads
pub fn toss_coin<R: Rng + ?Sized>(rng: &mut R, flips: u32) -> CoinSide {
    let heads = (0..flips).filter(|_| rng.gen_bool(0.5)).count();
    let tails = flips as usize - heads;
    tracing::debug!(heads, tails, "coin flipped");

    if tails > heads {
        CoinSide::Tails
    } else {
        CoinSide::Heads
    }
}

/// Tosses a coin and announces the winner
pub struct TossCoin {
    flips: u32,
}

impl TossCoin {
    /// Toss with a custom flip count
    #[must_use]
    pub const fn with_flips(flips: u32) -> Self {
        Self { flips }
    }
}

impl Default for TossCoin {
    fn default() -> Self {
        Self::with_flips(DEFAULT_FLIPS)
    }
}

#[async_trait(?Send)]
impl Handler for TossCoin {
    async fn handle(
        &self,
        _args: &[String],
        ctx: &mut AssistantContext,
        services: &mut Services,
    ) -> Result<Outcome> {
        let winner = toss_coin(&mut rand::thread_rng(), self.flips);

        let language = ctx.speech_language();
        let text = format!(
            "{} {}",
            services.phrases.get(winner.key(), language),
            services.phrases.get("won", language)
        );
        tracing::info!(winner = winner.key(), "coin toss");

        services.say(ctx, &text).await?;
        Ok(Outcome::Continue)
    }
}
