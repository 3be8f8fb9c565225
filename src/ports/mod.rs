/// Ports module defining interfaces for hexagonal architecture
///
/// The application core only drives outbound ports; the CLI in `main.rs`
/// calls the use cases directly.
pub mod outbound;
