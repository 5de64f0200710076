//! Answer text assembly.

/// Answer returned when the safety gate rejects a question.
pub const REFUSAL: &str = "Unsafe request. Please ask about Alaska snow services or weather.";

/// Heading placed above retrieved chunks.
pub const FAQ_HEADING: &str = "Relevant FAQ Information:";

/// Heading placed above the forecast text.
pub const WEATHER_HEADING: &str = "Weather Info (NWS):";

/// Answer used when neither retrieval nor weather produced anything.
pub const NO_RESPONSE: &str = "No response generated.";

/// Merge retrieved chunks and optional weather text into one answer.
///
/// Every section is its own paragraph, separated by a blank line.
pub fn assemble_answer<S: AsRef<str>>(chunks: &[S], weather: Option<&str>) -> String {
    let mut sections: Vec<&str> = Vec::new();

    if !chunks.is_empty() {
        sections.push(FAQ_HEADING);
        sections.extend(chunks.iter().map(|chunk| chunk.as_ref().trim()));
    }

    if let Some(weather) = weather {
        sections.push(WEATHER_HEADING);
        sections.push(weather);
    }

    let answer = sections.join("\n\n");
    let answer = answer.trim();
    if answer.is_empty() {
        NO_RESPONSE.to_string()
    } else {
        answer.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nothing_to_say() {
        let none: [&str; 0] = [];
        assert_eq!(assemble_answer(&none, None), NO_RESPONSE);
    }

    #[test]
    fn test_chunks_only() {
        let answer = assemble_answer(&["  Snow removal hours are 8am-6pm \n", "Plows run nightly."], None);
        assert_eq!(
            answer,
            "Relevant FAQ Information:\n\nSnow removal hours are 8am-6pm\n\nPlows run nightly."
        );
    }

    #[test]
    fn test_weather_only() {
        let none: [&str; 0] = [];
        let answer = assemble_answer(&none, Some("Tonight: Snow."));
        assert_eq!(answer, "Weather Info (NWS):\n\nTonight: Snow.");
    }

    #[test]
    fn test_chunks_then_weather() {
        let answer = assemble_answer(&["Plows run nightly."], Some("Weather API error (points): 503"));
        assert_eq!(
            answer,
            "Relevant FAQ Information:\n\nPlows run nightly.\n\nWeather Info (NWS):\n\nWeather API error (points): 503"
        );
    }

    #[test]
    fn test_trailing_whitespace_is_trimmed() {
        let none: [&str; 0] = [];
        let answer = assemble_answer(&none, Some("Today: \n"));
        assert_eq!(answer, "Weather Info (NWS):\n\nToday:");
    }
}
