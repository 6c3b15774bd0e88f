//! Canonical status vocabularies and normalization of legacy spellings.
//!
//! Each status column has exactly one stored vocabulary. Older data entry used
//! several spellings for the same state (`active`, `in_progress`, `En cours`);
//! inbound values are folded onto the canonical value before validation.

use crate::model::SelectOption;

fn option(value: &str, fr: &str, en: &str, aliases: &[&str]) -> SelectOption {
    SelectOption::new(value, fr, en).with_aliases(aliases)
}

pub fn project_status() -> Vec<SelectOption> {
    vec![
        option("planned", "Planifié", "Planned", &["planifie", "prevu", "a_venir"]),
        option("in_progress", "En cours", "In progress", &["active", "en_cours", "ongoing", "started"]),
        option("completed", "Terminé", "Completed", &["termine", "acheve", "done", "finished"]),
        option("suspended", "Suspendu", "Suspended", &["suspendu", "on_hold", "en_pause"]),
    ]
}

pub fn tender_status() -> Vec<SelectOption> {
    vec![
        option("open", "Ouvert", "Open", &["ouvert", "active", "published", "publie", "en_cours"]),
        option("closed", "Clôturé", "Closed", &["ferme", "cloture", "expired"]),
        option("awarded", "Attribué", "Awarded", &["attribue"]),
        option("cancelled", "Annulé", "Cancelled", &["annule", "canceled"]),
    ]
}

pub fn event_status() -> Vec<SelectOption> {
    vec![
        option("upcoming", "À venir", "Upcoming", &["a_venir", "planned", "planifie", "scheduled"]),
        option("ongoing", "En cours", "Ongoing", &["en_cours", "active", "in_progress"]),
        option("completed", "Terminé", "Completed", &["termine", "past", "passe"]),
        option("cancelled", "Annulé", "Cancelled", &["annule", "canceled"]),
    ]
}

pub fn career_status() -> Vec<SelectOption> {
    vec![
        option("open", "Ouvert", "Open", &["ouvert", "active", "published"]),
        option("closed", "Clôturé", "Closed", &["ferme", "cloture", "expired", "filled", "pourvu"]),
    ]
}

/// Lowercases, strips French diacritics and joins words with `_`.
pub fn fold(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.trim().chars() {
        let mapped = match c {
            'à' | 'â' | 'ä' | 'À' | 'Â' | 'Ä' => 'a',
            'é' | 'è' | 'ê' | 'ë' | 'É' | 'È' | 'Ê' | 'Ë' => 'e',
            'î' | 'ï' | 'Î' | 'Ï' => 'i',
            'ô' | 'ö' | 'Ô' | 'Ö' => 'o',
            'ù' | 'û' | 'ü' | 'Ù' | 'Û' | 'Ü' => 'u',
            'ç' | 'Ç' => 'c',
            ' ' | '-' => '_',
            other => other.to_ascii_lowercase(),
        };
        out.push(mapped);
    }
    out
}

/// Canonical option value for `input`, matching values and aliases after folding.
pub fn normalize<'a>(options: &'a [SelectOption], input: &str) -> Option<&'a str> {
    let folded = fold(input);
    options
        .iter()
        .find(|o| fold(&o.value) == folded || o.aliases.iter().any(|a| fold(a) == folded))
        .map(|o| o.value.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_project_spellings_map_to_one_value() {
        let opts = project_status();
        for raw in ["active", "in_progress", "En cours", "en-cours", "IN PROGRESS"] {
            assert_eq!(normalize(&opts, raw), Some("in_progress"), "{raw}");
        }
        assert_eq!(normalize(&opts, "Planifié"), Some("planned"));
        assert_eq!(normalize(&opts, "planned"), Some("planned"));
        assert_eq!(normalize(&opts, "Terminé"), Some("completed"));
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert_eq!(normalize(&project_status(), "archived"), None);
        assert_eq!(normalize(&tender_status(), ""), None);
    }

    #[test]
    fn same_word_can_mean_different_things_per_table() {
        assert_eq!(normalize(&tender_status(), "active"), Some("open"));
        assert_eq!(normalize(&event_status(), "active"), Some("ongoing"));
    }
}
