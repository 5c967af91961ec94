//! analysis/describe: summary statistics over a numeric series

use async_trait::async_trait;
use eskai_application::{ToolAction, ToolError};
use serde_json::{Value, json};

pub struct DescribeTool;

#[async_trait]
impl ToolAction for DescribeTool {
    fn description(&self) -> &str {
        "Count, mean, min, max and standard deviation of a numeric series"
    }

    async fn invoke(&self, args: &Value) -> Result<Value, ToolError> {
        let data = args
            .get("data")
            .and_then(Value::as_array)
            .ok_or_else(|| ToolError::InvalidArgument("'data' must be an array".into()))?;
        let values = data
            .iter()
            .map(|v| {
                v.as_f64()
                    .ok_or_else(|| ToolError::InvalidArgument(format!("not a number: {v}")))
            })
            .collect::<Result<Vec<f64>, _>>()?;
        describe(&values)
            .ok_or_else(|| ToolError::InvalidArgument("'data' is empty".into()))
    }
}

fn describe(values: &[f64]) -> Option<Value> {
    if values.is_empty() {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    Some(json!({
        "count": values.len(),
        "mean": mean,
        "min": min,
        "max": max,
        "std_dev": variance.sqrt(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_describe_series() {
        let out = DescribeTool
            .invoke(&json!({"data": [2, 4, 4, 4, 5, 5, 7, 9]}))
            .await
            .unwrap();
        assert_eq!(out["count"], 8);
        assert_eq!(out["mean"], 5.0);
        assert_eq!(out["min"], 2.0);
        assert_eq!(out["max"], 9.0);
        assert_eq!(out["std_dev"], 2.0);
    }

    #[tokio::test]
    async fn test_invalid_data() {
        for args in [json!({}), json!({"data": []}), json!({"data": [1, "two"]})] {
            assert!(matches!(
                DescribeTool.invoke(&args).await,
                Err(ToolError::InvalidArgument(_))
            ));
        }
    }
}
