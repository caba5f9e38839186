//! Presentation hook: turning a paginator into markup or any other output.

use crate::paginator::HybridPaginator;
use crate::window::Element;

/// What a renderer gets to work with.
#[derive(Debug)]
pub struct View<'a, T> {
    /// The page being rendered.
    pub paginator: &'a HybridPaginator<T>,
    /// Its link window.
    pub elements: Vec<Element>,
}

/// Produces presentation output for a page.
///
/// Closures taking a [`View`] are renderers too:
///
/// ```
/// # use hybrid_page::{HybridPaginator, PageParts, PaginatorOptions, View};
/// # use serde_json::json;
/// let parts = PageParts::new(vec![json!({"id": 1})], 10).ordering_keys(["id"]).total(1);
/// let page = HybridPaginator::new(parts, PaginatorOptions::default()).unwrap();
///
/// let summary = page.render(&|view: View<'_, _>| {
///     format!("page {} of {}", view.paginator.current_page(), view.elements.len())
/// });
/// assert_eq!(summary, "page 1 of 1");
/// ```
pub trait Renderer<T> {
    /// Rendered output.
    type Output;

    /// Render one view.
    fn render(&self, view: View<'_, T>) -> Self::Output;
}

impl<T, F, O> Renderer<T> for F
where
    F: for<'a> Fn(View<'a, T>) -> O,
{
    type Output = O;

    fn render(&self, view: View<'_, T>) -> O {
        self(view)
    }
}

impl<T> HybridPaginator<T> {
    /// Render this page with `renderer`.
    pub fn render<R: Renderer<T> + ?Sized>(&self, renderer: &R) -> R::Output {
        renderer.render(View {
            paginator: self,
            elements: self.elements(),
        })
    }

    /// Same as [`HybridPaginator::render`].
    pub fn links<R: Renderer<T> + ?Sized>(&self, renderer: &R) -> R::Output {
        self.render(renderer)
    }
}
