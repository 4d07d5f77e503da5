use super::types::AnnotationResult;

const KNIFE_LABEL: &str = "Knife";

/// Renders the alert text sent to every recipient.
///
/// Each result contributes, in response order:
///
/// ```text
/// Violence : <level>\n\n
/// Violence related objects detected: \n
/// knife\n            (only when a label mentions "Knife")
/// ```
///
/// No results means an empty message.
pub fn build_summary(results: &[AnnotationResult]) -> String {
    let mut out = String::new();

    for result in results {
        out.push_str("Violence : ");
        out.push_str(&result.safe_search_annotation.violence);
        out.push_str("\n\n");
        out.push_str("Violence related objects detected: \n");

        if mentions_knife(result) {
            out.push_str("knife\n");
        }
    }

    out
}

/// Case-sensitive substring match on each label description.
pub fn mentions_knife(result: &AnnotationResult) -> bool {
    result
        .label_annotations
        .iter()
        .any(|label| label.description.contains(KNIFE_LABEL))
}
