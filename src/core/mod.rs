pub mod chart_data;
pub mod pie_angles;
pub mod primitives;
pub mod scale;
pub mod series_store;
pub mod types;

pub use chart_data::{ChartData, XExtent};
pub use pie_angles::{PieAngles, SliceRef};
pub use primitives::{ZERO_VALUE_EPSILON, is_zero_value, normalize_degrees};
pub use scale::{LinearScale, ValueTransform};
pub use series_store::SeriesStore;
pub use types::{AnimationPhase, ChartKind, Color, Entry, Rounding, StackRange, Viewport};
