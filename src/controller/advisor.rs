use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::classifier::{ClassifierError, ConditionClassifier};
use crate::domain::{
    match_label, normalize_label, AnalysisOutcome, AssessmentSource, ConditionAssessment, ConditionLabel,
    Latitude, PanelImage, TiltReport,
};
use crate::optimizer::TiltOptimizer;

/// Turns (panel image, latitude) into a tilt recommendation.
///
/// Never fails: a missing input yields [`AnalysisOutcome::NoInput`], and any
/// classifier trouble degrades to a clean panel.
pub struct TiltAdvisor {
    classifier: Arc<dyn ConditionClassifier>,
    optimizer: TiltOptimizer,
    classify_timeout: Duration,
}

impl TiltAdvisor {
    pub fn new(
        classifier: Arc<dyn ConditionClassifier>,
        optimizer: TiltOptimizer,
        classify_timeout: Duration,
    ) -> Self {
        Self {
            classifier,
            optimizer,
            classify_timeout,
        }
    }

    pub fn classifier_name(&self) -> &'static str {
        self.classifier.name()
    }

    /// Classify the image and map the answer onto the condition vocabulary
    pub async fn assess_condition(&self, image: Option<&PanelImage>) -> ConditionAssessment {
        let Some(image) = image else {
            return ConditionAssessment {
                label: ConditionLabel::Clean,
                source: AssessmentSource::NoImage,
            };
        };

        let answer = tokio::time::timeout(self.classify_timeout, self.classifier.classify(image))
            .await
            .unwrap_or_else(|_| Err(ClassifierError::Timeout(self.classify_timeout)));

        match answer {
            Ok(raw) => {
                let label = normalize_label(Some(&raw));
                if match_label(&raw).is_some() {
                    ConditionAssessment {
                        label,
                        source: AssessmentSource::Classified { raw },
                    }
                } else {
                    debug!(answer = %raw, "classifier answer outside vocabulary, assuming clean");
                    ConditionAssessment {
                        label,
                        source: AssessmentSource::Unrecognized { raw },
                    }
                }
            }
            Err(e) => {
                warn!(error = %e, classifier = self.classifier.name(), "panel classification failed, assuming clean");
                ConditionAssessment {
                    label: ConditionLabel::Clean,
                    source: AssessmentSource::Failed { reason: e.summary() },
                }
            }
        }
    }

    /// Full analysis; the classifier is only consulted when both inputs are present
    pub async fn analyze(&self, image: Option<&PanelImage>, latitude: Option<f64>) -> AnalysisOutcome {
        let (Some(image), Some(latitude)) = (image, latitude) else {
            debug!("latitude or image missing, skipping analysis");
            return AnalysisOutcome::NoInput;
        };

        let assessment = self.assess_condition(Some(image)).await;
        let result = self.optimizer.optimize(Latitude(latitude), assessment.label);

        info!(
            latitude,
            condition = %result.condition,
            angle = result.angle.degrees(),
            efficiency = result.efficiency.percent(),
            degraded = assessment.is_degraded(),
            "tilt analysis complete"
        );

        AnalysisOutcome::Analyzed { result, assessment }
    }

    /// Presentation entry point: ("24°", "Bird Drop", 67.85) or the no-input sentinel
    pub async fn compute_best_angle(&self, image: Option<&PanelImage>, latitude: Option<f64>) -> TiltReport {
        TiltReport::from(&self.analyze(image, latitude).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::MockConditionClassifier;

    fn image() -> PanelImage {
        PanelImage::new("image/jpeg", "/9j/4AAQ")
    }

    fn advisor(mock: MockConditionClassifier) -> TiltAdvisor {
        TiltAdvisor::new(Arc::new(mock), TiltOptimizer::default(), Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_missing_inputs_skip_classifier() {
        let mut mock = MockConditionClassifier::new();
        mock.expect_classify().never();
        let advisor = advisor(mock);

        assert_eq!(advisor.analyze(None, Some(28.0)).await, AnalysisOutcome::NoInput);
        assert_eq!(advisor.analyze(Some(&image()), None).await, AnalysisOutcome::NoInput);
        assert_eq!(advisor.compute_best_angle(None, Some(28.0)).await, TiltReport::no_input());
        assert_eq!(advisor.compute_best_angle(Some(&image()), None).await, TiltReport::no_input());
    }

    #[tokio::test]
    async fn test_classified_bird_drop() {
        let mut mock = MockConditionClassifier::new();
        mock.expect_classify()
            .times(1)
            .returning(|_| Ok("Bird Drop".to_string()));
        let advisor = advisor(mock);

        let report = advisor.compute_best_angle(Some(&image()), Some(28.0)).await;
        assert_eq!(report.angle, "24°");
        assert_eq!(report.condition, "Bird Drop");
        assert_eq!(report.efficiency, 67.85);
    }

    #[tokio::test]
    async fn test_dusty_panel_text_maps_to_dusty() {
        let mut mock = MockConditionClassifier::new();
        mock.expect_classify().returning(|_| Ok("Dusty Panel".to_string()));
        let advisor = advisor(mock);

        match advisor.analyze(Some(&image()), Some(0.0)).await {
            AnalysisOutcome::Analyzed { result, assessment } => {
                assert_eq!(result.condition, ConditionLabel::Dusty);
                assert_eq!(result.efficiency.rounded(), 77.96);
                assert_eq!(
                    assessment.source,
                    AssessmentSource::Classified { raw: "Dusty Panel".into() }
                );
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_classifier_failure_degrades_to_clean() {
        let mut mock = MockConditionClassifier::new();
        mock.expect_name().return_const("mock");
        mock.expect_classify()
            .returning(|_| Err(ClassifierError::EmptyResponse));
        let advisor = advisor(mock);

        let assessment = advisor.assess_condition(Some(&image())).await;
        assert_eq!(assessment.label, ConditionLabel::Clean);
        assert!(matches!(assessment.source, AssessmentSource::Failed { .. }));

        let report = advisor.compute_best_angle(Some(&image()), Some(0.0)).await;
        assert_eq!(report.condition, "Clean");
        assert_eq!(report.angle, "3°");
        assert_eq!(report.efficiency, 97.96);
    }

    #[tokio::test]
    async fn test_failure_reason_is_bounded() {
        let mut mock = MockConditionClassifier::new();
        mock.expect_name().return_const("mock");
        mock.expect_classify().returning(|_| {
            Err(ClassifierError::Status {
                status: 429,
                body: "x".repeat(5000),
            })
        });
        let advisor = advisor(mock);

        let assessment = advisor.assess_condition(Some(&image())).await;
        assert_eq!(assessment.label, ConditionLabel::Clean);
        match assessment.source {
            AssessmentSource::Failed { reason } => {
                assert!(reason.starts_with("HTTP 429"));
                assert!(reason.chars().count() < 300);
            }
            other => panic!("unexpected source: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_labels_agree_with_normalize_label() {
        for answer in ["Bird Drop", "  SNOW COVERED\n", "not clean, dusty", "hail", "", "physical damage."] {
            let mut mock = MockConditionClassifier::new();
            let reply = answer.to_string();
            mock.expect_classify().returning(move |_| Ok(reply.clone()));

            let assessment = advisor(mock).assess_condition(Some(&image())).await;
            assert_eq!(assessment.label, normalize_label(Some(answer)), "answer {:?}", answer);
        }
    }

    #[tokio::test]
    async fn test_unrecognized_answer_degrades_to_clean() {
        let mut mock = MockConditionClassifier::new();
        mock.expect_classify().returning(|_| Ok("cracked frame".to_string()));
        let advisor = advisor(mock);

        let assessment = advisor.assess_condition(Some(&image())).await;
        assert_eq!(assessment.label, ConditionLabel::Clean);
        assert_eq!(
            assessment.source,
            AssessmentSource::Unrecognized { raw: "cracked frame".into() }
        );
    }

    #[tokio::test]
    async fn test_no_image_assessment() {
        let mut mock = MockConditionClassifier::new();
        mock.expect_classify().never();
        let assessment = advisor(mock).assess_condition(None).await;
        assert_eq!(assessment.label, ConditionLabel::Clean);
        assert_eq!(assessment.source, AssessmentSource::NoImage);
    }
}
