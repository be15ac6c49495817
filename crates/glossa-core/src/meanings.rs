use once_cell::sync::Lazy;
use regex::Regex;

/// One aligned sense pair split out of combined definition strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeaningPair {
    pub definition_target: String,
    pub definition: String,
}

// "digit(s) + period + whitespace", at the start or right after whitespace.
// The trailing match is lazy so that an adjacent token's leading whitespace
// stays available for its own match.
static SENSE_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|\s)(\d{1,2})\.\s+?").expect("sense token pattern"));

static LEADING_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\d{1,2}[.)]\s*").expect("leading number pattern"));

struct SenseToken {
    number: u32,
    token_start: usize,
    content_start: usize,
}

/// Decide whether combined definition strings hold multiple senses and split
/// them into aligned `(definition_target, definition)` pairs.
///
/// The target-language string is authoritative for the sense count; the
/// native-language string is split by a prioritized chain of strategies
/// (see [`split_native`]). A pair is dropped only when its target text is
/// empty after trimming the numbering.
pub fn parse_meanings(definition_target: &str, definition: &str) -> Vec<MeaningPair> {
    let target = definition_target.trim();
    let native = definition.trim();

    let Some(target_segments) = split_numbered(target) else {
        return vec![single_pair(target, native)];
    };

    let native_segments = split_native(native, target_segments.len());

    let pairs: Vec<MeaningPair> = target_segments
        .into_iter()
        .zip(native_segments)
        .filter(|(target_text, _)| !target_text.trim().is_empty())
        .map(|(target_text, native_text)| MeaningPair {
            definition_target: target_text.trim().to_string(),
            definition: native_text.trim().to_string(),
        })
        .collect();

    if pairs.is_empty() {
        return vec![single_pair(target, native)];
    }

    pairs
}

fn single_pair(target: &str, native: &str) -> MeaningPair {
    MeaningPair {
        definition_target: strip_leading_number(target),
        definition: strip_leading_number(native),
    }
}

/// Split a definition string at its numbered-list tokens.
///
/// Only tokens forming the ascending run 1, 2, 3, ... starting at 1 count as
/// sense markers, and at least two must be present. Prose numbers (years,
/// quantities) never fit the run and so never cause a false split.
pub fn split_numbered(text: &str) -> Option<Vec<String>> {
    let tokens = sense_tokens(text);
    let run = numbered_run(&tokens);
    if run.len() < 2 {
        return None;
    }

    let mut segments = Vec::with_capacity(run.len());
    for (position, token) in run.iter().enumerate() {
        let end = run
            .get(position + 1)
            .map(|next| next.token_start)
            .unwrap_or(text.len());
        segments.push(text[token.content_start..end].trim().to_string());
    }
    Some(segments)
}

fn sense_tokens(text: &str) -> Vec<SenseToken> {
    SENSE_TOKEN
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let digits = caps.get(1)?;
            Some(SenseToken {
                number: digits.as_str().parse().ok()?,
                token_start: digits.start(),
                content_start: whole.end(),
            })
        })
        .collect()
}

fn numbered_run(tokens: &[SenseToken]) -> Vec<&SenseToken> {
    let mut run = Vec::new();
    let mut expected = 1;
    for token in tokens {
        if token.number == expected {
            run.push(token);
            expected += 1;
        }
    }
    run
}

/// Strip a lone leading "1. " left over from a single-sense numbered string.
fn strip_leading_number(text: &str) -> String {
    LEADING_NUMBER.replace(text, "").trim().to_string()
}

type NativeStrategy = fn(&str, usize) -> Option<Vec<String>>;

/// Prioritized chain of native-string split strategies. Each returns `None`
/// when it cannot produce exactly `count` segments, and the next one is tried.
const NATIVE_STRATEGIES: [(&str, NativeStrategy); 3] = [
    ("numbered", native_numbered),
    ("markers", native_markers),
    ("sentences", native_sentences),
];

/// Split the native-language string into exactly `count` segments.
///
/// When every strategy fails, the whole native string is duplicated into
/// every slot — degraded output, but no sense is silently dropped.
fn split_native(native: &str, count: usize) -> Vec<String> {
    for (name, strategy) in NATIVE_STRATEGIES {
        if let Some(segments) = strategy(native, count) {
            tracing::debug!("native definition split by {name} strategy");
            return segments;
        }
    }

    tracing::warn!("native definition does not split into {count} segments, duplicating whole text");
    vec![native.to_string(); count]
}

fn native_numbered(native: &str, count: usize) -> Option<Vec<String>> {
    split_numbered(native).filter(|segments| segments.len() == count)
}

fn native_markers(native: &str, count: usize) -> Option<Vec<String>> {
    let parts: Vec<String> = native
        .split([';', '；'])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect();

    (parts.len() == count).then_some(parts)
}

/// Sentence-level split, pairing by leading sense number first and by
/// position for whatever remains.
fn native_sentences(native: &str, count: usize) -> Option<Vec<String>> {
    let sentences: Vec<String> = native
        .split(['.', '!', '?', '。'])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        // bare numbers are list-token debris, not sentences
        .filter(|part| !part.chars().all(|c| c.is_ascii_digit()))
        .map(str::to_string)
        .collect();

    if sentences.is_empty() {
        return None;
    }

    let mut slots: Vec<Option<String>> = vec![None; count];
    let mut leftovers = Vec::new();

    for sentence in sentences {
        match leading_sense_number(&sentence) {
            Some((number, rest))
                if (1..=count as u32).contains(&number)
                    && slots[(number - 1) as usize].is_none() =>
            {
                slots[(number - 1) as usize] = Some(rest);
            }
            _ => leftovers.push(sentence),
        }
    }

    let mut leftovers = leftovers.into_iter();
    for slot in slots.iter_mut() {
        if slot.is_none() {
            *slot = leftovers.next();
        }
    }

    slots.into_iter().collect()
}

fn leading_sense_number(sentence: &str) -> Option<(u32, String)> {
    let matched = LEADING_NUMBER.find(sentence)?;
    let number: u32 = matched
        .as_str()
        .trim()
        .trim_end_matches(['.', ')'])
        .trim()
        .parse()
        .ok()?;
    Some((number, sentence[matched.end()..].trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_two_numbered_senses_with_matching_native() {
        let pairs = parse_meanings(
            "1. a financial institution 2. the edge of a river",
            "1. die Bank 2. das Ufer",
        );

        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].definition_target, "a financial institution");
        assert_eq!(pairs[0].definition, "die Bank");
        assert_eq!(pairs[1].definition_target, "the edge of a river");
        assert_eq!(pairs[1].definition, "das Ufer");
    }

    #[test]
    fn single_segment_returns_one_trimmed_meaning() {
        let pairs = parse_meanings("  a financial institution  ", "  die Bank ");

        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].definition_target, "a financial institution");
        assert_eq!(pairs[0].definition, "die Bank");
    }

    #[test]
    fn lone_leading_number_is_stripped() {
        let pairs = parse_meanings("1. only sense", "1. einzige Bedeutung");

        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].definition_target, "only sense");
        assert_eq!(pairs[0].definition, "einzige Bedeutung");
    }

    #[test]
    fn prose_numbers_do_not_cause_a_split() {
        let pairs = parse_meanings(
            "a style of painting popular around 1890. often large canvases",
            "eine Malweise um 1890",
        );

        assert_eq!(pairs.len(), 1);
    }

    #[test]
    fn out_of_sequence_numbers_are_not_sense_markers() {
        // "5. " reads like a quantity, not a list: no run starting at 1
        assert!(split_numbered("costs about 5. sometimes more").is_none());
    }

    #[test]
    fn empty_input_yields_one_empty_meaning() {
        let pairs = parse_meanings("", "");

        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].definition_target, "");
        assert_eq!(pairs[0].definition, "");
    }

    #[test]
    fn native_falls_back_to_marker_split() {
        let pairs = parse_meanings("1. a fish 2. a guitar part", "ein Fisch; ein Gitarrenteil");

        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].definition, "ein Fisch");
        assert_eq!(pairs[1].definition, "ein Gitarrenteil");
    }

    #[test]
    fn native_falls_back_to_sentence_split_with_number_prefixes() {
        let pairs = parse_meanings(
            "1. a financial institution 2. the edge of a river",
            "2) das Ufer. 1) die Bank.",
        );

        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].definition, "die Bank");
        assert_eq!(pairs[1].definition, "das Ufer");
    }

    #[test]
    fn unsplittable_native_is_duplicated_into_every_slot() {
        let pairs = parse_meanings(
            "1. a financial institution 2. the edge of a river",
            "die Bank",
        );

        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].definition, "die Bank");
        assert_eq!(pairs[1].definition, "die Bank");
    }

    #[test]
    fn empty_target_segments_are_dropped() {
        let pairs = parse_meanings("1.   2. the edge of a river", "1. x 2. das Ufer");

        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].definition_target, "the edge of a river");
        assert_eq!(pairs[0].definition, "das Ufer");
    }

    #[test]
    fn three_senses_split_in_order() {
        let pairs = parse_meanings(
            "1. first sense 2. second sense 3. third sense",
            "1. erste 2. zweite 3. dritte",
        );

        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs[2].definition_target, "third sense");
        assert_eq!(pairs[2].definition, "dritte");
    }
}
