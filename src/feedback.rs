// One-call comparison of a reference transcript against a recognized one

use serde::Serialize;

use crate::annotation::{RenderedTranscript, render_annotations};
use crate::config::ComparisonConfig;
use crate::error::FeedbackError;
use crate::omission::{OmissionReport, detect_omissions};
use crate::reinsert::reinsert_omissions;
use crate::substitution::{SubstitutionReport, recognized_errors, reference_errors};
use crate::transcript::Transcript;

/// Everything a caller needs to score and display one attempt
#[derive(Debug, Clone, Serialize)]
pub struct Feedback {
    /// Normalized reference, as compared
    pub reference: String,
    /// Normalized recognized transcript, as compared
    pub recognized: String,
    /// Substitutions located in reference tokens
    pub reference_errors: SubstitutionReport,
    /// Substitutions located in recognized tokens
    pub recognized_errors: SubstitutionReport,
    pub omissions: OmissionReport,
    /// Recognized transcript with every omitted run spliced back in
    pub restored: String,
    /// Recognized transcript annotated with its substitutions and omissions
    pub rendered: RenderedTranscript,
}

impl Feedback {
    /// True when no pass found anything to report
    pub fn is_clean(&self) -> bool {
        self.reference_errors.error_count == 0
            && self.recognized_errors.error_count == 0
            && self.omissions.records.is_empty()
            && self.omissions.unaligned.is_empty()
    }
}

pub fn compare(reference: &str, recognized: &str, config: &ComparisonConfig) -> Result<Feedback, FeedbackError> {
    let reference = Transcript::normalized(reference, &config.ignored_characters);
    let recognized = Transcript::normalized(recognized, &config.ignored_characters);

    if reference.len() != recognized.len() {
        tracing::debug!(
            reference = reference.len(),
            recognized = recognized.len(),
            "token counts differ, trailing tokens are not compared"
        );
    }

    let reference_report = reference_errors(&reference, &recognized);
    let recognized_report = recognized_errors(&reference, &recognized);
    let omissions = detect_omissions(&reference, &recognized);

    let restored = reinsert_omissions(&recognized, &omissions.records)?;
    let rendered = render_annotations(&recognized, &recognized_report.records, &omissions.records);

    Ok(Feedback {
        reference: reference.to_string(),
        recognized: recognized.to_string(),
        reference_errors: reference_report,
        recognized_errors: recognized_report,
        omissions,
        restored,
        rendered,
    })
}
