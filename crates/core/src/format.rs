use crate::types::{Report, Transcript};

/// Format seconds as MM:SS timestamp
pub fn format_timestamp(seconds: f64) -> String {
    let mins = (seconds / 60.0) as u32;
    let secs = (seconds % 60.0) as u32;
    format!("{:02}:{:02}", mins, secs)
}

/// Format transcript segments with timestamps
pub fn format_transcript_with_timestamps(transcript: &Transcript) -> String {
    transcript
        .segments
        .iter()
        .map(|seg| format!("[{}] {}", format_timestamp(seg.start), seg.text.trim()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a pipeline report as human-readable markdown
pub fn format_report_readable(report: &Report) -> String {
    let mut output = String::new();

    output.push_str(&format!("# Notes for {}\n\n", report.content_id));
    output.push_str(&format!("![thumbnail]({})\n\n", report.thumbnail_url));

    let language = if report.normalized.was_translated() {
        format!(
            "{} → {}",
            report.normalized.source_language, report.normalized.target_language
        )
    } else {
        report.normalized.target_language.clone()
    };
    output.push_str(&format!(
        "**Duration:** {} | **Captions:** {} | **Language:** {}\n\n",
        format_timestamp(report.transcript.duration_seconds()),
        report.transcript.language,
        language
    ));

    output.push_str(&format!(
        "## Summary ({} sentence{})\n\n",
        report.summary.sentence_count,
        if report.summary.sentence_count == 1 { "" } else { "s" }
    ));
    output.push_str(&report.summary.text);
    output.push('\n');

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ContentId, NormalizedText, Summary, TranscriptSegment};

    #[test]
    fn timestamps_are_zero_padded() {
        assert_eq!(format_timestamp(0.0), "00:00");
        assert_eq!(format_timestamp(125.5), "02:05");
    }

    #[test]
    fn transcript_lines_carry_start_times() {
        let transcript = Transcript::from_segments(
            "en",
            vec![
                TranscriptSegment {
                    text: " Hello ".into(),
                    start: 0.0,
                    duration: 2.0,
                },
                TranscriptSegment {
                    text: "world".into(),
                    start: 61.0,
                    duration: 2.0,
                },
            ],
        );

        assert_eq!(
            format_transcript_with_timestamps(&transcript),
            "[00:00] Hello\n[01:01] world"
        );
    }

    #[test]
    fn report_mentions_translation_and_summary() {
        let content_id = ContentId::new("abc123").unwrap();
        let report = Report {
            thumbnail_url: content_id.thumbnail_url(),
            content_id,
            transcript: Transcript::from_segments(
                "fr",
                vec![TranscriptSegment {
                    text: "Bonjour".into(),
                    start: 0.0,
                    duration: 90.0,
                }],
            ),
            normalized: NormalizedText {
                text: "Hello".into(),
                source_language: "fr".into(),
                target_language: "en".into(),
            },
            summary: Summary {
                text: "Hello".into(),
                sentence_count: 1,
            },
        };

        let readable = format_report_readable(&report);
        assert!(readable.contains("https://img.youtube.com/vi/abc123/0.jpg"));
        assert!(readable.contains("**Language:** fr → en"));
        assert!(readable.contains("**Duration:** 01:30"));
        assert!(readable.contains("## Summary (1 sentence)\n\nHello\n"));
    }
}
