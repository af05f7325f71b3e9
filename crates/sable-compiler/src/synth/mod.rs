//! Type synthesis for the type-defining constructs.
//!
//! Every construct builds its type through the registry's three-phase
//! protocol and finalizes it before returning, so sibling constructs only ever
//! see complete types. A failure anywhere drops the builder: nothing partial
//! reaches the registry.
//!
//! | Construct        | Base              | Interfaces                      | Fields |
//! |------------------|-------------------|---------------------------------|--------|
//! | generated iface  | -                 | extended interfaces             | no     |
//! | record           | `object`          | requested                       | yes    |
//! | function wrapper | `object`          | invoker instances per arity     | no     |
//! | anonymous object | `object`          | requested + metadata interface  | no     |
//! | proxy            | first, if a class | the rest (or all)               | no     |

pub mod fn_wrapper;
pub mod interface;
pub mod members;
pub mod proxy;
pub mod record;
pub mod reify;

pub use fn_wrapper::synthesize_fn_wrapper;
pub use interface::synthesize_interface;
pub use members::{CandidateSet, implement_methods, resolve_method, split_member_name};
pub use proxy::synthesize_proxy;
pub use record::{BASIS_METHOD, is_volatile_compatible, synthesize_record};
pub use reify::synthesize_reify;
