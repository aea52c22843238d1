//! Renderer port: the consumer of dashboard projections.

use homedash_domain::dashboard::DashboardView;

/// Redraws the UI from a fresh projection.
///
/// The core never inspects rendering output; a call is only a trigger.
pub trait Renderer {
    fn render(&self, view: &DashboardView);
}

impl<T: Renderer> Renderer for std::sync::Arc<T> {
    fn render(&self, view: &DashboardView) {
        (**self).render(view);
    }
}
