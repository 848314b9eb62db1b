//! Receipt classification
//!
//! An external image-understanding service proposes field values for a
//! receipt. Its output is never trusted: values are sanitized against the
//! current taxonomy and only pre-fill an editable draft.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::config::settings::{ClassifierCommand, Settings};
use crate::error::{VyapaarError, VyapaarResult};
use crate::models::{ExpenseDraft, Money, Receipt, Taxonomy};

/// Advisory shown when classification is unavailable
pub const MANUAL_ENTRY_ADVISORY: &str =
    "Could not auto-scan receipt. Please enter details manually.";

/// An image read from disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptImage {
    mime_type: String,
    bytes: Vec<u8>,
}

impl ReceiptImage {
    pub fn new(mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Read an image file; the mime type is inferred from the extension
    pub fn from_path(path: &Path) -> VyapaarResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            VyapaarError::Io(format!("Failed to read receipt {}: {}", path.display(), e))
        })?;
        Ok(Self::new(mime_type_for(path), bytes))
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Base64 payload without any prefix
    pub fn to_base64(&self) -> String {
        BASE64.encode(&self.bytes)
    }

    /// `data:<mime>;base64,<payload>`
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.to_base64())
    }

    /// Attachment stored on the expense
    pub fn to_receipt(&self) -> Receipt {
        Receipt::Inline(self.to_data_url())
    }
}

fn mime_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("heic") => "image/heic",
        _ => "image/jpeg",
    }
}

/// Best-effort field values read from a receipt
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClassificationSuggestion {
    pub amount: Option<Money>,
    pub date: Option<NaiveDate>,
    pub merchant: Option<String>,
    pub description: Option<String>,
    pub reference_number: Option<String>,
    /// Always one of the supplied categories or the fallback category
    pub category: Option<String>,
    /// One of the supplied business units, or unset
    pub business_unit: Option<String>,
    pub confidence: f32,
}

/// Raw service response
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawClassification {
    amount: Option<f64>,
    date: Option<String>,
    merchant: Option<String>,
    description: Option<String>,
    reference_number: Option<String>,
    category: Option<String>,
    business_unit: Option<String>,
}

impl ClassificationSuggestion {
    /// Parse and sanitize a JSON response from the service
    pub fn from_response(
        json: &str,
        taxonomy: Taxonomy<'_>,
        fallback_category: &str,
    ) -> VyapaarResult<Self> {
        let raw: RawClassification = serde_json::from_str(json.trim()).map_err(|e| {
            VyapaarError::Classification(format!("Malformed classifier response: {}", e))
        })?;

        let category = match raw.category {
            Some(c) if taxonomy.has_category(&c) => c,
            _ => fallback_category.to_string(),
        };
        let business_unit = raw.business_unit.filter(|b| taxonomy.has_business_unit(b));

        let date = raw.date.as_deref().and_then(|d| {
            let parsed = NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d").ok();
            if parsed.is_none() {
                log::debug!("Ignoring unparseable classifier date '{}'", d);
            }
            parsed
        });

        Ok(Self {
            amount: raw
                .amount
                .filter(|a| a.is_finite() && *a >= 0.0)
                .map(Money::from_decimal),
            date,
            merchant: non_empty(raw.merchant),
            description: non_empty(raw.description),
            reference_number: non_empty(raw.reference_number),
            category: Some(category),
            business_unit,
            confidence: 1.0,
        })
    }

    /// Overwrite the draft fields this suggestion supplies
    ///
    /// Empty strings and a zero amount leave the draft untouched.
    pub fn apply_to(&self, draft: &mut ExpenseDraft) {
        if let Some(amount) = self.amount.filter(|a| !a.is_zero()) {
            draft.amount = amount;
        }
        if let Some(date) = self.date {
            draft.date = date;
        }
        if let Some(merchant) = &self.merchant {
            draft.merchant = merchant.clone();
        }
        if let Some(description) = &self.description {
            draft.description = description.clone();
        }
        if let Some(category) = &self.category {
            draft.category = category.clone();
        }
        if let Some(business_unit) = &self.business_unit {
            draft.business_unit = business_unit.clone();
        }
        if let Some(reference) = &self.reference_number {
            draft.reference_number = Some(reference.clone());
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Reads structured fields from a receipt image
pub trait ReceiptClassifier {
    fn classify(
        &self,
        image: &ReceiptImage,
        taxonomy: Taxonomy<'_>,
    ) -> VyapaarResult<ClassificationSuggestion>;
}

/// Stand-in used when no classifier is configured
pub struct DemoClassifier {
    today: NaiveDate,
}

impl DemoClassifier {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }
}

impl ReceiptClassifier for DemoClassifier {
    fn classify(
        &self,
        _image: &ReceiptImage,
        taxonomy: Taxonomy<'_>,
    ) -> VyapaarResult<ClassificationSuggestion> {
        log::warn!("No receipt classifier configured; returning demo data");

        Ok(ClassificationSuggestion {
            amount: Some(Money::from_paise(123450)),
            date: Some(self.today),
            merchant: Some("Demo Merchant (No API Key)".into()),
            description: Some("Auto-detected from receipt (Mock)".into()),
            reference_number: Some("UPI-1234567890".into()),
            category: Some(
                taxonomy
                    .categories
                    .first()
                    .cloned()
                    .unwrap_or_else(|| "Materials".into()),
            ),
            business_unit: Some(
                taxonomy
                    .business_units
                    .first()
                    .cloned()
                    .unwrap_or_else(|| "Head Office".into()),
            ),
            confidence: 0.9,
        })
    }
}

/// Classifier backed by an external program
///
/// The program gets the base64 image on stdin and a JSON object
/// `{"categories": [...], "businessUnits": [...]}` as its last argument.
pub struct CommandClassifier {
    command: ClassifierCommand,
    fallback_category: String,
}

impl CommandClassifier {
    pub fn new(command: ClassifierCommand, fallback_category: impl Into<String>) -> Self {
        Self {
            command,
            fallback_category: fallback_category.into(),
        }
    }
}

impl ReceiptClassifier for CommandClassifier {
    fn classify(
        &self,
        image: &ReceiptImage,
        taxonomy: Taxonomy<'_>,
    ) -> VyapaarResult<ClassificationSuggestion> {
        let taxonomy_arg = serde_json::json!({
            "categories": taxonomy.categories,
            "businessUnits": taxonomy.business_units,
        })
        .to_string();

        log::debug!("Running classifier '{}'", self.command.program);
        let mut child = Command::new(&self.command.program)
            .args(&self.command.args)
            .arg(taxonomy_arg)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                VyapaarError::Classification(format!(
                    "Failed to start '{}': {}",
                    self.command.program, e
                ))
            })?;

        // Feed stdin from a separate thread so a chatty child cannot deadlock us
        let payload = image.to_base64();
        let writer = child.stdin.take().map(|mut stdin| {
            std::thread::spawn(move || {
                // A child that exits without reading stdin is reported via its status
                let _ = stdin.write_all(payload.as_bytes());
            })
        });

        let output = child.wait_with_output().map_err(|e| {
            VyapaarError::Classification(format!("Classifier did not finish: {}", e))
        })?;
        if let Some(writer) = writer {
            let _ = writer.join();
        }

        if !output.status.success() {
            return Err(VyapaarError::Classification(format!(
                "Classifier exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        ClassificationSuggestion::from_response(&stdout, taxonomy, &self.fallback_category)
    }
}

/// The classifier selected by the settings
pub fn classifier_from_settings(settings: &Settings, today: NaiveDate) -> Box<dyn ReceiptClassifier> {
    match &settings.classifier {
        Some(command) => Box::new(CommandClassifier::new(
            command.clone(),
            settings.fallback_category.clone(),
        )),
        None => Box::new(DemoClassifier::new(today)),
    }
}

/// Run one classification attempt and merge it into the draft
///
/// Returns the advisory to show the user when classification failed; the
/// draft is then left as it was.
pub fn prefill_draft(
    classifier: &dyn ReceiptClassifier,
    image: &ReceiptImage,
    taxonomy: Taxonomy<'_>,
    draft: &mut ExpenseDraft,
) -> Option<&'static str> {
    match classifier.classify(image, taxonomy) {
        Ok(suggestion) => {
            log::info!(
                "Receipt classified with confidence {:.2}",
                suggestion.confidence
            );
            suggestion.apply_to(draft);
            None
        }
        Err(e) => {
            log::warn!("Receipt classification failed: {}", e);
            Some(MANUAL_ENTRY_ADVISORY)
        }
    }
}
