//! One-shot submission without a window: fill a page's form from
//! `name=value` assignments, submit once, and return the rendered view.

use calc_core::{CalculationApi, CalculatorKind, CalculatorPage, ResultsView, StalePolicy};
use tracing::info;

pub async fn run_once(
    api: &dyn CalculationApi,
    kind: CalculatorKind,
    assignments: &[String],
    policy: StalePolicy,
) -> anyhow::Result<ResultsView> {
    let mut page = CalculatorPage::new(kind, policy);
    for assignment in assignments {
        page.apply_assignment(assignment)?;
    }
    info!(page = kind.slug(), "submitting headless\n{}", page.form());

    page.submit(api).await;
    Ok(page.view())
}

/// Page titles, slugs, and each field with its default.
pub fn describe_pages() -> String {
    CalculatorKind::ALL
        .into_iter()
        .map(|kind| {
            let fields: String = kind
                .fields()
                .iter()
                .map(|field| {
                    format!(
                        "  {:<18} {:<10} {}\n",
                        field.name, field.default, field.label
                    )
                })
                .collect();
            format!("{} ({})\n{fields}", kind.title(), kind.slug())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use calc_core::{AnalysisResult, ApiError, FormState};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::Mutex;

    struct EchoApi {
        payloads: Mutex<Vec<serde_json::Value>>,
    }

    #[async_trait]
    impl CalculationApi for EchoApi {
        async fn calculate(
            &self,
            _kind: CalculatorKind,
            form: &FormState,
        ) -> Result<AnalysisResult, ApiError> {
            let payload = serde_json::to_value(form).unwrap();
            self.payloads.lock().unwrap().push(payload.clone());
            Ok(serde_json::from_value(json!({
                "numericalResults": {"Echo": payload["rbBw"]},
                "aiExplanation": "p1\np2"
            }))
            .unwrap())
        }
    }

    #[tokio::test]
    async fn assignments_reach_the_payload() {
        let api = EchoApi {
            payloads: Mutex::new(Vec::new()),
        };
        let view = run_once(
            &api,
            CalculatorKind::Ofdm,
            &["rbBw=360".to_string()],
            StalePolicy::default(),
        )
        .await
        .unwrap();

        assert_eq!(
            view.to_string(),
            "Analysis Results\n\nKey Metrics\n  Echo: 360\n\nAI-Powered Explanation\n  p1\n  p2\n"
        );
        assert_eq!(api.payloads.lock().unwrap()[0]["symbolsPerRb"], json!("7"));
    }

    #[tokio::test]
    async fn unknown_field_fails_before_sending() {
        let api = EchoApi {
            payloads: Mutex::new(Vec::new()),
        };
        let err = run_once(
            &api,
            CalculatorKind::Ofdm,
            &["bandwidth=1".to_string()],
            StalePolicy::default(),
        )
        .await
        .unwrap_err();

        assert!(err.to_string().contains("bandwidth"));
        assert!(api.payloads.lock().unwrap().is_empty());
    }

    #[test]
    fn describe_lists_every_page_and_field() {
        let text = describe_pages();
        for kind in CalculatorKind::ALL {
            assert!(text.contains(kind.slug()));
            for field in kind.fields() {
                assert!(text.contains(field.name));
            }
        }
    }

    #[test]
    fn describe_has_one_line_per_page_and_field() {
        let text = describe_pages();
        let expected = CalculatorKind::ALL
            .iter()
            .map(|kind| 1 + kind.fields().len())
            .sum::<usize>();
        assert_eq!(text.lines().count(), expected);
        assert_eq!(
            text.lines().next(),
            Some("1. Wireless Communication System (wireless-system)")
        );
        assert_eq!(
            text.lines().nth(1),
            Some("  bandwidth          4000       Bandwidth (Hz)")
        );
    }
}
