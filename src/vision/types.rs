use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeatureType {
    WebDetection,
    SafeSearchDetection,
    LabelDetection,
}

/// Every annotate call asks for the same three features, in this order.
pub const REQUESTED_FEATURES: [FeatureType; 3] = [
    FeatureType::WebDetection,
    FeatureType::SafeSearchDetection,
    FeatureType::LabelDetection,
];

#[derive(Debug, Serialize)]
pub struct AnnotateRequest<'a> {
    pub requests: Vec<AnnotateImageRequest<'a>>,
}

#[derive(Debug, Serialize)]
pub struct AnnotateImageRequest<'a> {
    pub image: ImageContent<'a>,
    pub features: Vec<Feature>,
}

#[derive(Debug, Serialize)]
pub struct ImageContent<'a> {
    pub content: &'a str,
}

#[derive(Debug, Serialize)]
pub struct Feature {
    #[serde(rename = "type")]
    pub kind: FeatureType,
}

impl<'a> AnnotateRequest<'a> {
    pub fn for_image(content: &'a str) -> Self {
        Self {
            requests: vec![AnnotateImageRequest {
                image: ImageContent { content },
                features: REQUESTED_FEATURES
                    .iter()
                    .map(|kind| Feature { kind: *kind })
                    .collect(),
            }],
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AnnotateResponse {
    #[serde(default)]
    pub responses: Vec<AnnotationResult>,
}

/// Annotations for a single submitted image.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationResult {
    #[serde(default)]
    pub safe_search_annotation: SafeSearchAnnotation,
    #[serde(default)]
    pub label_annotations: Vec<LabelAnnotation>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SafeSearchAnnotation {
    /// Likelihood bucket, e.g. `VERY_LIKELY` or `UNLIKELY`.
    #[serde(default)]
    pub violence: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LabelAnnotation {
    #[serde(default)]
    pub description: String,
}

impl AnnotationResult {
    pub fn label_descriptions(&self) -> Vec<&str> {
        self.label_annotations
            .iter()
            .map(|l| l.description.as_str())
            .collect()
    }
}
