//! Pipeline instrumentation.
//!
//! Stages record a span and key/value events. Without the `tracing` feature
//! both macros only evaluate their field expressions.

/// Span around one pipeline stage: `trace_span!("stage", key = value).entered()`.
#[cfg(feature = "tracing")]
macro_rules! trace_span {
    ($stage:literal $(, $key:ident = $value:expr)* $(,)?) => {
        tracing::info_span!($stage $(, $key = $value)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_span {
    ($stage:literal $(, $key:ident = $value:expr)* $(,)?) => {{
        let _ = ($($value,)*);
        $crate::trace::StageGuard
    }};
}

/// Event carrying the measurements of a stage.
#[cfg(feature = "tracing")]
macro_rules! trace_event {
    ($stage:literal, $($key:ident = $value:expr),+ $(,)?) => {
        tracing::info!(name: $stage, $($key = $value),+)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_event {
    ($stage:literal, $($key:ident = $value:expr),+ $(,)?) => {
        let _ = ($($value,)+);
    };
}

pub(crate) use trace_event;
pub(crate) use trace_span;

#[cfg(not(feature = "tracing"))]
pub(crate) struct StageGuard;

#[cfg(not(feature = "tracing"))]
impl StageGuard {
    #[inline]
    pub(crate) fn entered(self) -> Self {
        self
    }
}
