/// ProgressReporter port for console feedback during a scan
///
/// Scans walk many projects, repositories and work items one request at a
/// time, so the user needs to see where the scanner currently is. Reports go
/// to stderr in the real adapter so they never mix with tables on stdout.
pub trait ProgressReporter {
    /// Reports a progress line (e.g. one processed repository branch)
    fn report(&self, message: &str);

    /// Reports counted progress
    ///
    /// # Arguments
    /// * `current` - Items processed so far
    /// * `total` - Total items expected
    /// * `message` - Optional label for the current item
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Reports a recoverable problem; the scan continues
    fn report_warning(&self, message: &str);

    /// Reports completion of a scan stage
    fn report_completion(&self, message: &str);
}
