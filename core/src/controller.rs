/// A group of handlers sharing one router state.
///
/// Implemented by `#[clientes_macros::controller]`; the generated router
/// still needs `with_state` before it can be served.
pub trait Controller {
    type State: Clone + Send + Sync + 'static;

    fn router() -> axum::Router<Self::State>;
}
