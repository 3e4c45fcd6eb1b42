//! Symptom advice - keyword lookup over free-text symptom notes.

/// Advice returned when no keyword matches.
pub const GENERIC_TIP: &str =
    "Maintaining a balanced diet and regular exercise can help with your menstrual health.";

/// Ordered (keyword, advice) pairs. Earlier entries win.
pub const DEFAULT_RULES: &[(&str, &str)] = &[
    ("cramps", "Try applying a warm compress to your lower abdomen for relief."),
    ("fatigue", "Ensure you're getting enough rest and hydration."),
    ("headache", "Drink plenty of water and rest in a quiet, dim room."),
    ("bloating", "Cut back on salty foods and try gentle walks to ease bloating."),
    ("back pain", "Gentle stretching and a heating pad on your lower back can help."),
    ("nausea", "Eat small, plain meals and sip ginger or peppermint tea."),
    ("mood", "Light exercise and regular sleep can help steady your mood."),
    ("irritab", "Light exercise and regular sleep can help steady your mood."),
    ("acne", "Keep your skin clean and avoid touching your face during your cycle."),
    ("heavy", "Track how often you change products; see a doctor if flow soaks through hourly."),
];

/// Maps symptom text to a canned tip.
#[derive(Debug, Clone)]
pub struct SymptomAdvisor {
    rules: Vec<(String, &'static str)>,
}

impl SymptomAdvisor {
    /// Creates an advisor with the built-in keyword table.
    pub fn new() -> Self {
        Self::with_rules(DEFAULT_RULES.iter().copied())
    }

    /// Creates an advisor from a custom ordered keyword table.
    ///
    /// Keywords are matched case-insensitively; empty keywords are ignored.
    pub fn with_rules<'a>(rules: impl IntoIterator<Item = (&'a str, &'static str)>) -> Self {
        let rules = rules
            .into_iter()
            .map(|(keyword, advice)| (keyword.trim().to_lowercase(), advice))
            .filter(|(keyword, _)| !keyword.is_empty())
            .collect();
        Self { rules }
    }

    /// Returns the advice for the first keyword found in `symptoms`.
    pub fn advise(&self, symptoms: &str) -> &'static str {
        let text = symptoms.to_lowercase();
        self.rules
            .iter()
            .find(|(keyword, _)| text.contains(keyword.as_str()))
            .map(|(_, advice)| *advice)
            .unwrap_or(GENERIC_TIP)
    }
}

impl Default for SymptomAdvisor {
    fn default() -> Self {
        Self::new()
    }
}

/// Advice for `symptoms` using the built-in table.
pub fn advise(symptoms: &str) -> &'static str {
    SymptomAdvisor::new().advise(symptoms)
}
