// substation-core: Synthetic telemetry, alerting, trend and report logic
// shared by the substation dashboard binaries.

pub mod alert;
pub mod control;
pub mod error;
pub mod generator;
pub mod live;
pub mod model;
pub mod report;
pub mod trend;

// ── Primary re-exports ──────────────────────────────────────────────
pub use alert::{Alert, AlertLevel};
pub use control::{ControlPanel, Equipment, SwitchState};
pub use error::CoreError;
pub use generator::{generate, generate_with};
pub use live::{Delta, GeneratorStatus, LiveFrame, Tile};
pub use model::{Field, FieldValue, Reading};
pub use report::{ReportDocument, generate_report, report_file_name, write_report};
pub use trend::{TrendMetric, TrendSample, TrendSeries};
