/// Human-facing progress channel.
///
/// `good` announces a discovery, `status` a step being started; `warning` and
/// `error` report conditions the run continues past.
pub trait StatusSink: Send + Sync {
    fn status(&self, message: &str);
    fn good(&self, message: &str);
    fn warning(&self, message: &str);
    fn error(&self, message: &str);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NullStatusSink;

impl StatusSink for NullStatusSink {
    fn status(&self, _message: &str) {}
    fn good(&self, _message: &str) {}
    fn warning(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
}
