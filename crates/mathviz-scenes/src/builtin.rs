//! Scenes that ship with the render backend.

use std::collections::BTreeMap;

use tracing::info;

use crate::registry::{DiscoveryReport, SceneDescriptor, SceneHandle, SceneRegistry};
use crate::source::{SceneSource, StaticSceneSource};

/// Key of the scene rendered for unknown visualization types.
pub const UNSUPPORTED_KEY: &str = "unsupported";

/// The "Unsupported visualization" notice scene. Not part of the registry.
#[must_use]
pub fn unsupported_scene() -> SceneDescriptor {
    SceneDescriptor {
        key: UNSUPPORTED_KEY.to_owned(),
        handle: SceneHandle("UnsupportedScene".to_owned()),
        param_schema: BTreeMap::new(),
    }
}

const PLUGIN_SCENES: &[StaticSceneSource] = &[
    StaticSceneSource::new(
        "activation_function",
        "ActivationFunctionScene",
        &[
            ("function", "str in {'sigmoid','relu','tanh'} (default 'sigmoid')"),
            ("x_min", "float (default -6)"),
            ("x_max", "float (default 6)"),
        ],
    ),
    StaticSceneSource::new(
        "backpropagation",
        "BackpropagationScene",
        &[
            ("layers", "List[int]: e.g. [3,4,2]"),
            ("learning_rate", "float (default 0.1)"),
        ],
    ),
    StaticSceneSource::new(
        "convolution",
        "ConvolutionScene",
        &[
            ("input_matrix", "List[List[float]] (default 5x5 sample)"),
            ("kernel", "List[List[float]] (default 3x3 edge detector)"),
            ("stride", "int (default 1)"),
        ],
    ),
    StaticSceneSource::new(
        "feedforward_nn",
        "FeedForwardNNScene",
        &[
            ("layers", "List[int]: e.g. [3,4,2]"),
            ("activation", "str in {'relu','sigmoid','tanh','linear'} (default 'relu')"),
        ],
    ),
    StaticSceneSource::new(
        "gradient_descent",
        "GradientDescentScene",
        &[
            ("function", "str: f(x,y) in terms of x,y, e.g. '(x-1)**2 + (y+2)**2'"),
            ("start_point", "List[float]: [x0,y0] (default [3,3])"),
            ("learning_rate", "float (default 0.1)"),
            ("steps", "int (default 20)"),
            ("x_range", "List[float]: [min,max,step] (default [-4,4,1])"),
            ("y_range", "List[float]: [min,max,step] (default [-4,4,1])"),
        ],
    ),
    StaticSceneSource::new(
        "histogram_sampling",
        "HistogramSamplingScene",
        &[
            ("data", "List[float] (optional)"),
            ("mean", "float (default 0.0 if data not provided)"),
            ("std", "float (default 1.0 if data not provided)"),
            ("n", "int number of samples when generating (default 500)"),
            ("bins", "int number of bins (default 20)"),
        ],
    ),
    StaticSceneSource::new(
        "linear_transform",
        "LinearTransformScene",
        &[
            ("matrix", "List[List[float]]: 2x2 matrix, e.g. [[1,0],[0,1]]"),
            ("show_basis", "bool (default True)"),
            ("grid_x_range", "List[float]: [min, max, step] (default [-6, 6, 1])"),
            ("grid_y_range", "List[float]: [min, max, step] (default [-4, 4, 1])"),
        ],
    ),
    StaticSceneSource::new(
        "loss_landscape",
        "LossLandscapeScene",
        &[
            ("function", "str: z=f(x,y) (default '(x-1)**2 + (y+2)**2')"),
            ("x_range", "List[float]: [min,max,step] (default [-3,3,1])"),
            ("y_range", "List[float]: [min,max,step] (default [-3,3,1])"),
        ],
    ),
    StaticSceneSource::new(
        "normal_distribution",
        "NormalDistributionScene",
        &[
            ("mean", "float (default 0.0)"),
            ("std", "float > 0 (default 1.0)"),
            ("x_min", "float (default -4)"),
            ("x_max", "float (default 4)"),
        ],
    ),
    StaticSceneSource::new(
        "parametric_curve",
        "ParametricCurveScene",
        &[
            ("x_of_t", "str: x(t), e.g. 'cos(t)'"),
            ("y_of_t", "str: y(t), e.g. 'sin(t)'"),
            ("t_min", "float (default 0)"),
            ("t_max", "float (default 2*pi)"),
            ("color", "str/color (default BLUE)"),
        ],
    ),
    StaticSceneSource::new(
        "plot_function",
        "PlotFunctionScene",
        &[
            ("expression", "str: function of x, e.g. 'sin(x) + 0.5*cos(2*x)'"),
            ("x_min", "float (default 0)"),
            ("x_max", "float (default 2*pi)"),
            ("color", "str/color (default BLUE)"),
        ],
    ),
    StaticSceneSource::new(
        "pooling",
        "PoolingScene",
        &[
            ("pool_type", "str in {'max','avg'} (default 'max')"),
            ("kernel_size", "int (default 2)"),
            ("stride", "int (default equals kernel_size)"),
            ("input_matrix", "List[List[float]] (default 4x4 sample)"),
        ],
    ),
    StaticSceneSource::new(
        "vector",
        "VectorScene",
        &[
            ("vectors", "List[List[float]]: list of 2D vectors"),
            ("colors", "List[str]: optional list of color names"),
        ],
    ),
];

/// The bundled plugin scenes as discoverable sources.
#[must_use]
pub fn plugin_sources() -> Vec<Box<dyn SceneSource>> {
    PLUGIN_SCENES
        .iter()
        .map(|source| Box::new(*source) as Box<dyn SceneSource>)
        .collect()
}

/// Registers the statically known scenes.
pub fn register_static(registry: &mut SceneRegistry) {
    registry.register(
        "fourier_series",
        SceneHandle("FourierSquareWave".to_owned()),
        BTreeMap::from([(
            "terms".to_owned(),
            "List[int]: odd harmonics to sum (default [1,3,5,7,9])".to_owned(),
        )]),
    );
}

/// Builds the startup registry: static scenes, bundled plugins, then any
/// extra sources (e.g. a plugin directory) in the order given.
#[must_use]
pub fn startup_registry(
    extra_sources: &[Box<dyn SceneSource>],
) -> (SceneRegistry, DiscoveryReport) {
    let mut registry = SceneRegistry::new();
    register_static(&mut registry);

    let mut report = registry.discover(&plugin_sources());
    let extra = registry.discover(extra_sources);
    report.registered.extend(extra.registered);
    report.skipped.extend(extra.skipped);

    info!(
        scenes = registry.len(),
        skipped = report.skipped.len(),
        "scene registry initialized"
    );
    (registry, report)
}
