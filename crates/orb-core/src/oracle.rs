//! The prediction oracle.
//!
//! The orb treats prediction text as an opaque collaborator: anything that
//! implements [`Oracle`] can be plugged into a session. [`TableOracle`] is the
//! default, stitching a prediction together from three phrase tables.

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use uuid::Builder;

use crate::state::Prediction;

/// Produces a prediction for a sanitized name.
pub trait Oracle {
    /// Generate a prediction. With `personalized` the name is woven into the text.
    fn predict(&mut self, name: &str, personalized: bool) -> Prediction;
}

/// Openings that address the seeker by name.
pub const NAMED_OPENINGS: &[&str] = &[
    "{name}, шар видит",
    "{name}, нити судьбы показывают",
    "Для тебя, {name}, звёзды шепчут:",
    "{name}, туман рассеивается, и видно",
];

/// Openings without a name.
pub const OPENINGS: &[&str] = &[
    "Шар видит",
    "Нити судьбы показывают",
    "Звёзды шепчут:",
    "Туман рассеивается, и видно",
];

/// The omen itself.
pub const OMENS: &[&str] = &[
    "неожиданную встречу у старой двери",
    "письмо, которое изменит твои планы",
    "тихий успех там, где ты его не ждёшь",
    "дорогу, которая начнётся с маленького шага",
    "возвращение давно забытой мечты",
    "удачу в деле, которое ты откладывал",
    "смех, который растопит чужое сердце",
    "перемену ветра к концу недели",
];

/// Closing advice.
pub const ADVICE: &[&str] = &[
    "Доверься первому чувству.",
    "Не спеши отвечать.",
    "Сохрани это в тайне до полнолуния.",
    "Скажи «да» тому, что пугает.",
    "Оставь дверь приоткрытой.",
    "Смотри внимательнее на мелочи.",
];

/// Default oracle drawing from the phrase tables with a seeded RNG.
#[derive(Debug, Clone)]
pub struct TableOracle {
    rng: StdRng,
}

impl TableOracle {
    /// Create an oracle with a fixed seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn pick(&mut self, table: &'static [&'static str]) -> &'static str {
        table.choose(&mut self.rng).copied().unwrap_or_default()
    }

    fn next_id(&mut self) -> String {
        let bytes: [u8; 16] = self.rng.random();
        let uuid = Builder::from_random_bytes(bytes).into_uuid();
        uuid.simple().to_string()[..8].to_string()
    }
}

impl Oracle for TableOracle {
    fn predict(&mut self, name: &str, personalized: bool) -> Prediction {
        let opening = if personalized && !name.is_empty() {
            self.pick(NAMED_OPENINGS).replace("{name}", name)
        } else {
            self.pick(OPENINGS).to_string()
        };
        let omen = self.pick(OMENS);
        let advice = self.pick(ADVICE);

        Prediction {
            id: self.next_id(),
            text: format!("{opening} {omen}. {advice}"),
        }
    }
}
