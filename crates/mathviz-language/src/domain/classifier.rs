//! Offline keyword classifier.
//!
//! An ordered table of `(keywords, template)` rules evaluated against the
//! lower-cased prompt. The first rule with any matching keyword wins; a prompt
//! matching nothing becomes a plot of `x**2`.

use mathviz_core::job::{Parameters, StructuredJob};
use serde_json::{Value, json};

struct MockRule {
    keywords: &'static [&'static str],
    template: fn() -> StructuredJob,
}

impl MockRule {
    fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|keyword| lowered.contains(keyword))
    }
}

const RULES: &[MockRule] = &[
    MockRule {
        keywords: &["fourier", "square wave", "square-wave"],
        template: fourier_series,
    },
    MockRule {
        keywords: &["matrix", "transform"],
        template: linear_transform,
    },
    MockRule {
        keywords: &["taylor", "series"],
        template: taylor_series,
    },
    MockRule {
        keywords: &["eigenvalue", "eigen"],
        template: eigenvalue_demo,
    },
];

fn object(value: Value) -> Parameters {
    match value {
        Value::Object(map) => map,
        _ => Parameters::new(),
    }
}

fn fourier_series() -> StructuredJob {
    StructuredJob::new(
        "fourier_series",
        object(json!({ "terms": [1, 3, 5, 7, 9], "target_function": "square_wave" })),
        "Fourier series approximation of a square wave using odd harmonics",
    )
}

fn linear_transform() -> StructuredJob {
    StructuredJob::new(
        "linear_transform",
        object(json!({ "matrix": [[2, 1], [1, 2]], "show_eigenvectors": true })),
        "Linear transformation visualization with eigenvector analysis",
    )
}

fn taylor_series() -> StructuredJob {
    StructuredJob::new(
        "taylor_series",
        object(json!({ "function": "exp(x)", "center": 0, "terms": 5 })),
        "Taylor series expansion of e^x around x=0",
    )
}

fn eigenvalue_demo() -> StructuredJob {
    StructuredJob::new(
        "eigenvalue_demo",
        object(json!({ "matrix": [[3, 1], [0, 2]] })),
        "Eigenvalue and eigenvector demonstration",
    )
}

fn function_plot() -> StructuredJob {
    StructuredJob::new(
        "function_plot",
        object(json!({ "expression": "x**2", "x_range": [-3, 3] })),
        "Function plot visualization",
    )
}

/// Derives a fully specified job from keywords in the prompt.
#[must_use]
pub fn classify(prompt: &str) -> StructuredJob {
    let lowered = prompt.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.matches(&lowered))
        .map_or_else(function_plot, |rule| (rule.template)())
}
