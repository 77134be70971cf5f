use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::math::matrix::Matrix;

/// Elementwise nonlinearity applied after each layer's linear transform.
///
/// The set is closed; a network selects one variant by name at construction
/// (`"sigmoid"` or `"relu"`) and an unknown name fails the build — no
/// default is substituted silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivationFunction {
    Sigmoid,
    ReLU,
}

impl ActivationFunction {
    pub fn value(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid => 1.0 / (1.0 + (-x).exp()),
            ActivationFunction::ReLU => {
                if x > 0.0 {
                    x
                } else {
                    0.0
                }
            }
        }
    }

    /// Elementwise derivative.
    ///
    /// For `Sigmoid` the argument must already be the sigmoid *output* `y`;
    /// the derivative is then `y * (1 - y)` without recomputing the sigmoid.
    /// Passing a pre-activation value here yields a wrong derivative.
    pub fn derivative(&self, y: f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid => y * (1.0 - y),
            ActivationFunction::ReLU => {
                if y > 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }

    /// Applies the activation to every cell in place.
    pub fn apply(&self, matrix: &mut Matrix) {
        matrix.map(|v, _, _| self.value(v));
    }

    /// Applies the derivative rule to every cell in place. See
    /// [`ActivationFunction::derivative`] for the sigmoid input convention.
    pub fn apply_derivative(&self, matrix: &mut Matrix) {
        matrix.map(|v, _, _| self.derivative(v));
    }

    pub fn name(&self) -> &'static str {
        match self {
            ActivationFunction::Sigmoid => "sigmoid",
            ActivationFunction::ReLU => "relu",
        }
    }
}

impl FromStr for ActivationFunction {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self, Error> {
        match name {
            "sigmoid" => Ok(ActivationFunction::Sigmoid),
            "relu" => Ok(ActivationFunction::ReLU),
            other => Err(Error::UnknownActivation(other.to_string())),
        }
    }
}

impl fmt::Display for ActivationFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn sigmoid_values() {
        let sigmoid = ActivationFunction::Sigmoid;
        assert_relative_eq!(sigmoid.value(0.0), 0.5);
        assert_relative_eq!(sigmoid.value(2.0), 1.0 / (1.0 + (-2.0f64).exp()));
        assert!(sigmoid.value(-40.0) < 1e-10);
    }

    #[test]
    fn sigmoid_derivative_takes_activated_output() {
        let sigmoid = ActivationFunction::Sigmoid;
        let y = sigmoid.value(0.7);
        assert_relative_eq!(sigmoid.derivative(y), y * (1.0 - y));
    }

    #[test]
    fn relu_values_and_derivative() {
        let relu = ActivationFunction::ReLU;
        assert_eq!(relu.value(3.5), 3.5);
        assert_eq!(relu.value(-3.5), 0.0);
        assert_eq!(relu.derivative(3.5), 1.0);
        assert_eq!(relu.derivative(0.0), 0.0);
        assert_eq!(relu.derivative(-3.5), 0.0);
    }

    #[test]
    fn apply_maps_every_cell() {
        let mut m = Matrix::from_array(&[-1.0, 0.0, 2.0]);
        ActivationFunction::ReLU.apply(&mut m);
        assert_eq!(m.to_array(), vec![0.0, 0.0, 2.0]);
    }

    #[test]
    fn parse_known_and_unknown_names() {
        assert_eq!(
            "sigmoid".parse::<ActivationFunction>().unwrap(),
            ActivationFunction::Sigmoid
        );
        assert_eq!(
            "relu".parse::<ActivationFunction>().unwrap(),
            ActivationFunction::ReLU
        );
        assert!(matches!(
            "tanh".parse::<ActivationFunction>(),
            Err(Error::UnknownActivation(_))
        ));
    }
}
