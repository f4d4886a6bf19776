//! Offline explanations keyed on visualization type.

use mathviz_core::job::Parameters;
use serde_json::Value;

const GENERIC_EXPLANATION: &str = "This animation visualizes the requested concept.";

fn render_terms(parameters: &Parameters) -> String {
    match parameters.get("terms") {
        Some(Value::Array(items)) if !items.is_empty() => {
            let joined: Vec<String> = items.iter().map(Value::to_string).collect();
            format!("[{}]", joined.join(", "))
        }
        _ => "[default terms]".to_owned(),
    }
}

fn render_expression(parameters: &Parameters) -> String {
    match parameters.get("expression") {
        Some(Value::String(expr)) if !expr.is_empty() => expr.clone(),
        Some(other) if !other.is_null() => other.to_string(),
        _ => "f(x)".to_owned(),
    }
}

/// Produces a short pedagogical paragraph for a job.
///
/// Unknown types fall back to `description`, then to a generic sentence.
#[must_use]
pub fn canned_explanation(
    visualization_type: &str,
    parameters: &Parameters,
    description: &str,
) -> String {
    match visualization_type {
        "fourier_series" => format!(
            "This animation builds a square wave using a Fourier series. At each step, we add an \
             odd harmonic (1st, 3rd, 5th, ...) of sine waves with decreasing amplitudes. Here, the \
             terms used are {}. As more terms are added, the approximation sharpens near the \
             jumps (Gibbs phenomenon), and the curve looks increasingly like a square wave.",
            render_terms(parameters)
        ),
        "linear_transform" => "This shows how a 2x2 matrix transforms points in the plane. Grids \
             and shapes are stretched, rotated, or sheared according to the matrix. If \
             eigenvectors are shown, those directions remain on their line while being scaled by \
             the eigenvalues."
            .to_owned(),
        "function_plot" => format!(
            "This plots the function {}. You can see how the value changes with x and observe key \
             features like growth, curvature, and symmetry.",
            render_expression(parameters)
        ),
        "taylor_series" => "This illustrates a Taylor series approximation: we build a \
             polynomial around a point to match the function's value and derivatives. As we \
             include more terms, the polynomial better matches the function near the center."
            .to_owned(),
        "eigenvalue_demo" => "This demonstrates eigenvalues and eigenvectors: along eigenvector \
             directions, the transformation acts as a simple scaling by the corresponding \
             eigenvalue."
            .to_owned(),
        _ if !description.trim().is_empty() => description.to_owned(),
        _ => GENERIC_EXPLANATION.to_owned(),
    }
}
