//! Regression network artifact.
//!
//! The admission model is a small fully-connected network exported by the
//! training pipeline as JSON: an ordered list of dense layers, each with a
//! row-major weight matrix, a bias vector, and an activation. Inference is a
//! plain forward pass; there is no randomness at evaluation time, so a fixed
//! input always yields a bit-identical output.
//!
//! The JSON geometry is validated once while deserializing; after that the
//! forward pass only has to check the input width.

use std::path::Path;

use nalgebra::{DMatrix, DVector};
use serde::Deserialize;

use crate::error::AppError;

/// Element-wise activation applied after each dense layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    Linear,
    Relu,
    Sigmoid,
    Tanh,
}

impl Activation {
    fn apply(self, v: f64) -> f64 {
        match self {
            Activation::Linear => v,
            Activation::Relu => v.max(0.0),
            Activation::Sigmoid => 1.0 / (1.0 + (-v).exp()),
            Activation::Tanh => v.tanh(),
        }
    }
}

/// One dense layer: `out = activation(W x + b)`.
#[derive(Debug, Clone)]
struct DenseLayer {
    weights: DMatrix<f64>,
    bias: DVector<f64>,
    activation: Activation,
}

/// A loaded regression network, ready for repeated forward passes.
///
/// Deserialization goes through [`NetworkFile`] so that every constructed
/// value has already passed geometry validation.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "NetworkFile")]
pub struct RegressionNetwork {
    layers: Vec<DenseLayer>,
}

impl RegressionNetwork {
    /// Input width of the first layer (the feature count the network expects).
    pub fn input_count(&self) -> usize {
        self.layers.first().map_or(0, |l| l.weights.ncols())
    }

    /// Output width of the final layer (always 1 after validation).
    pub fn output_count(&self) -> usize {
        self.layers.last().map_or(0, |l| l.weights.nrows())
    }

    /// Run the forward pass and return the single raw output.
    ///
    /// The output is the value the network was trained to emit (nominally an
    /// admission probability in [0, 1]); it is not clamped here.
    pub fn predict(&self, x: &DVector<f64>) -> Result<f64, AppError> {
        if x.len() != self.input_count() {
            return Err(AppError::new(
                5,
                format!(
                    "Network expects {} input features, got {}.",
                    self.input_count(),
                    x.len()
                ),
            ));
        }

        let mut h = x.clone();
        for layer in &self.layers {
            let mut z = &layer.weights * h + &layer.bias;
            z.apply(|v| *v = layer.activation.apply(*v));
            h = z;
        }

        let out = h[0];
        if !out.is_finite() {
            return Err(AppError::new(5, "Non-finite model output."));
        }
        Ok(out)
    }
}

/// On-disk layer encoding (row-major weights).
#[derive(Debug, Clone, Deserialize)]
struct LayerFile {
    weights: Vec<Vec<f64>>,
    bias: Vec<f64>,
    activation: Activation,
}

/// On-disk network encoding.
#[derive(Debug, Clone, Deserialize)]
struct NetworkFile {
    layers: Vec<LayerFile>,
}

impl TryFrom<NetworkFile> for RegressionNetwork {
    type Error = String;

    fn try_from(file: NetworkFile) -> Result<Self, String> {
        if file.layers.is_empty() {
            return Err("network has no layers.".to_string());
        }

        let mut layers = Vec::with_capacity(file.layers.len());
        let mut prev_width: Option<usize> = None;

        for (idx, layer) in file.layers.into_iter().enumerate() {
            let rows = layer.weights.len();
            if rows == 0 {
                return Err(format!("layer {idx} has an empty weight matrix."));
            }
            let cols = layer.weights[0].len();
            if cols == 0 {
                return Err(format!("layer {idx} has zero-width weight rows."));
            }
            if layer.weights.iter().any(|row| row.len() != cols) {
                return Err(format!("layer {idx} weight matrix is not rectangular."));
            }
            if layer.bias.len() != rows {
                return Err(format!(
                    "layer {idx} has {rows} weight rows but {} bias entries.",
                    layer.bias.len()
                ));
            }
            if let Some(prev) = prev_width {
                if cols != prev {
                    return Err(format!(
                        "layer {idx} expects {cols} inputs but the previous layer emits {prev}."
                    ));
                }
            }
            let finite = layer
                .weights
                .iter()
                .flatten()
                .chain(layer.bias.iter())
                .all(|v| v.is_finite());
            if !finite {
                return Err(format!("layer {idx} contains non-finite values."));
            }

            prev_width = Some(rows);
            layers.push(DenseLayer {
                weights: DMatrix::from_fn(rows, cols, |r, c| layer.weights[r][c]),
                bias: DVector::from_vec(layer.bias),
                activation: layer.activation,
            });
        }

        if prev_width != Some(1) {
            return Err(format!(
                "final layer emits {} outputs; a regression head must emit exactly 1.",
                prev_width.unwrap_or(0)
            ));
        }

        Ok(RegressionNetwork { layers })
    }
}

/// Read a network JSON file.
///
/// Both malformed JSON and inconsistent geometry surface as exit code 4; the
/// geometry message from [`TryFrom`] is carried inside the serde error.
pub fn read_network_json(path: &Path) -> Result<RegressionNetwork, AppError> {
    let file = super::open_artifact(path, "model")?;
    serde_json::from_reader(file)
        .map_err(|e| AppError::new(4, format!("Invalid model JSON '{}': {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn network(value: serde_json::Value) -> Result<RegressionNetwork, String> {
        serde_json::from_value::<RegressionNetwork>(value).map_err(|e| e.to_string())
    }

    #[test]
    fn predict_single_linear_layer() {
        let net = network(json!({
            "layers": [{"weights": [[0.3, 0.4, 0.5]], "bias": [-0.1], "activation": "linear"}]
        }))
        .unwrap();
        let y = net.predict(&DVector::from_row_slice(&[0.0, 1.0, 1.0])).unwrap();
        assert!((y - 0.8).abs() < 1e-12);
    }

    #[test]
    fn relu_hidden_layer_zeroes_negative_units() {
        let net = network(json!({
            "layers": [
                {"weights": [[1.0], [-1.0]], "bias": [0.0, 0.0], "activation": "relu"},
                {"weights": [[1.0, 1.0]], "bias": [0.0], "activation": "linear"},
            ]
        }))
        .unwrap();

        // relu(2) + relu(-2) = 2
        let y = net.predict(&DVector::from_row_slice(&[2.0])).unwrap();
        assert!((y - 2.0).abs() < 1e-12);
        // relu(-3) + relu(3) = 3
        let y = net.predict(&DVector::from_row_slice(&[-3.0])).unwrap();
        assert!((y - 3.0).abs() < 1e-12);
    }

    #[test]
    fn sigmoid_head_stays_in_unit_interval() {
        let net = network(json!({
            "layers": [{"weights": [[10.0]], "bias": [0.0], "activation": "sigmoid"}]
        }))
        .unwrap();

        let lo = net.predict(&DVector::from_row_slice(&[-10.0])).unwrap();
        let hi = net.predict(&DVector::from_row_slice(&[10.0])).unwrap();
        assert!(lo > 0.0 && lo < 0.001);
        assert!(hi > 0.999 && hi < 1.0);
    }

    #[test]
    fn predict_rejects_wrong_input_width() {
        let net = network(json!({
            "layers": [{"weights": [[1.0, 1.0]], "bias": [0.0], "activation": "linear"}]
        }))
        .unwrap();
        let err = net.predict(&DVector::from_row_slice(&[1.0])).unwrap_err();
        assert_eq!(err.exit_code(), 5);
    }

    #[test]
    fn deserialization_rejects_ragged_weight_matrix() {
        let err = network(json!({
            "layers": [{"weights": [[1.0, 2.0], [3.0]], "bias": [0.0, 0.0], "activation": "linear"}]
        }))
        .unwrap_err();
        assert!(err.contains("rectangular"));
    }

    #[test]
    fn deserialization_rejects_multi_output_head() {
        let err = network(json!({
            "layers": [{"weights": [[1.0], [2.0]], "bias": [0.0, 0.0], "activation": "linear"}]
        }))
        .unwrap_err();
        assert!(err.contains("exactly 1"));
    }

    #[test]
    fn deserialization_rejects_layer_width_mismatch() {
        let err = network(json!({
            "layers": [
                {"weights": [[1.0, 1.0], [1.0, 1.0]], "bias": [0.0, 0.0], "activation": "relu"},
                {"weights": [[1.0, 1.0, 1.0]], "bias": [0.0], "activation": "linear"},
            ]
        }))
        .unwrap_err();
        assert!(err.contains("previous layer"));
    }
}
