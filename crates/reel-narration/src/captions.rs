//! Caption cue grouping.
//!
//! A pure, deterministic function of the word timings: identical input
//! always yields identical cues.

use reel_models::{Caption, WordTiming};

/// Maximum words per caption cue.
pub const MAX_WORDS_PER_CUE: usize = 6;

/// Maximum cue duration in milliseconds.
pub const MAX_CUE_DURATION_MS: u64 = 3000;

/// Group word timings into caption cues.
///
/// A cue closes when it reaches [`MAX_WORDS_PER_CUE`] words or when adding
/// the next word would push it past [`MAX_CUE_DURATION_MS`], whichever comes
/// first. Resulting cues are ordered by start, pairwise non-overlapping, and
/// clamped so the last cue ends no later than `audio_duration_ms`.
pub fn group_captions(words: &[WordTiming], audio_duration_ms: u64) -> Vec<Caption> {
    let mut cues: Vec<Caption> = Vec::new();
    let mut current: Vec<&WordTiming> = Vec::new();

    let flush = |current: &mut Vec<&WordTiming>, cues: &mut Vec<Caption>| {
        if current.is_empty() {
            return;
        }
        let prev_end = cues.last().map(|c| c.end_ms).unwrap_or(0);
        let start_ms = current[0].start_ms.max(prev_end);
        let end_ms = current[current.len() - 1]
            .end_ms
            .min(audio_duration_ms)
            .max(start_ms + 1);
        let text = current
            .iter()
            .map(|w| w.word.trim())
            .filter(|w| !w.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if !text.is_empty() && start_ms < audio_duration_ms {
            cues.push(Caption {
                text,
                start_ms,
                end_ms: end_ms.min(audio_duration_ms),
            });
        }
        current.clear();
    };

    for word in words {
        if !current.is_empty() {
            let cue_start = current[0].start_ms;
            let would_overflow = current.len() >= MAX_WORDS_PER_CUE
                || word.end_ms.saturating_sub(cue_start) > MAX_CUE_DURATION_MS;
            if would_overflow {
                flush(&mut current, &mut cues);
            }
        }
        current.push(word);
    }
    flush(&mut current, &mut cues);

    cues
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(spec: &[(&str, u64, u64)]) -> Vec<WordTiming> {
        spec.iter()
            .map(|(w, s, e)| WordTiming {
                word: w.to_string(),
                start_ms: *s,
                end_ms: *e,
            })
            .collect()
    }

    fn assert_invariants(cues: &[Caption], audio_duration_ms: u64) {
        for cue in cues {
            assert!(cue.start_ms < cue.end_ms, "cue start must precede end");
        }
        for pair in cues.windows(2) {
            assert!(pair[0].end_ms <= pair[1].start_ms, "cues must not overlap");
        }
        if let Some(last) = cues.last() {
            assert!(last.end_ms <= audio_duration_ms);
        }
    }

    #[test]
    fn test_single_cue() {
        let cues = group_captions(
            &words(&[("hello", 0, 400), ("world", 450, 900)]),
            1000,
        );
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].text, "hello world");
        assert_eq!(cues[0].start_ms, 0);
        assert_eq!(cues[0].end_ms, 900);
        assert_invariants(&cues, 1000);
    }

    #[test]
    fn test_splits_on_word_cap() {
        let input: Vec<WordTiming> = (0..8)
            .map(|i| WordTiming {
                word: format!("w{}", i),
                start_ms: i * 100,
                end_ms: i * 100 + 90,
            })
            .collect();
        let cues = group_captions(&input, 1000);
        assert_eq!(cues.len(), 2);
        assert_eq!(cues[0].text, "w0 w1 w2 w3 w4 w5");
        assert_eq!(cues[1].text, "w6 w7");
        assert_invariants(&cues, 1000);
    }

    #[test]
    fn test_splits_on_duration_cap() {
        let cues = group_captions(
            &words(&[
                ("slow", 0, 2800),
                ("speech", 2900, 4000),
                ("here", 4100, 4500),
            ]),
            5000,
        );
        assert_eq!(cues.len(), 2);
        assert_eq!(cues[0].text, "slow");
        assert_eq!(cues[1].text, "speech here");
        assert_invariants(&cues, 5000);
    }

    #[test]
    fn test_clamps_to_audio_duration() {
        // Aligner overshoot past the audio end is clamped.
        let cues = group_captions(&words(&[("tail", 1000, 2600)]), 2400);
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].end_ms, 2400);
        assert_invariants(&cues, 2400);
    }

    #[test]
    fn test_empty_input() {
        assert!(group_captions(&[], 1000).is_empty());
    }

    #[test]
    fn test_deterministic() {
        let input = words(&[("a", 0, 100), ("b", 150, 300), ("c", 320, 700)]);
        assert_eq!(group_captions(&input, 800), group_captions(&input, 800));
    }
}
