mod router;

pub use router::{BoxedHandler, RouteMatch, Router};
