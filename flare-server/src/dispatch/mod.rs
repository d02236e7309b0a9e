mod dispatcher;

pub use dispatcher::*;
