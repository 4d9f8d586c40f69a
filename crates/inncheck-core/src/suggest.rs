//! Local inspection suggestions
//!
//! A fixed pool of inspection items per unit type. Unknown types fall back
//! to the `Padrão` pool. Suggestions land in the checklist as
//! [`Category::AiSuggestion`] tasks.

use crate::checklist::{Category, Task};
use rand::seq::IndexedRandom;
use rand::Rng;

/// How many suggestions one request yields
pub const SUGGESTION_COUNT: usize = 4;

/// Type name of the fallback pool
pub const DEFAULT_POOL: &str = "Padrão";

const FULL_PROPERTY: &[&str] = &[
    "Verificar pressão hidráulica de todos os chuveiros",
    "Testar vedação e trilhos das portas de correr da varanda",
    "Conferir nível de gás nos botijões (fogão e sauna)",
    "Vistoriar integridade das redes de descanso e ganchos",
    "Testar repetidor de sinal Wi-Fi em todos os cômodos",
    "Conferir limpeza profunda sob as camas de casal",
    "Verificar lâmpadas da área gourmet e piscina",
    "Testar funcionamento da Airfryer e Freezer",
    "Vistoriar box dos banheiros para possíveis trincas",
    "Conferir kit de churrasco e estado da grelha",
];

const STANDARD: &[&str] = &[
    "Verificar frigobar e data de validade dos itens",
    "Testar todos os pontos de iluminação e tomadas",
    "Vistoriar enxoval para manchas ou furos",
    "Conferir controle remoto da TV e pilhas",
    "Testar fechadura eletrônica/manual da porta principal",
];

/// Suggestion pool for a unit type
#[must_use]
pub fn pool(unit_type: &str) -> &'static [&'static str] {
    match unit_type.trim() {
        "Propriedade Integral" => FULL_PROPERTY,
        _ => STANDARD,
    }
}

/// Pick up to [`SUGGESTION_COUNT`] distinct titles from the pool at random
pub fn pick<R: Rng + ?Sized>(unit_type: &str, rng: &mut R) -> Vec<&'static str> {
    pool(unit_type)
        .choose_multiple(rng, SUGGESTION_COUNT)
        .copied()
        .collect()
}

/// Fresh pending suggestion tasks for a unit type
#[must_use]
pub fn suggest(unit_type: &str) -> Vec<Task> {
    let titles = pick(unit_type, &mut rand::rng());
    tracing::debug!(unit_type, count = titles.len(), "Picked inspection suggestions");
    titles
        .into_iter()
        .map(|title| Task::new(title, Category::AiSuggestion))
        .collect()
}
