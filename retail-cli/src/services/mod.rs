//! Service Layer
//!
//! Business rules per entity, composed over the repositories. Services hold
//! their collaborators by value; everything is injected through constructors.

pub mod customer;
pub mod order;
pub mod payment;
pub mod product;
pub mod report;

pub use customer::CustomerService;
pub use order::{ItemRequest, OrderService};
pub use payment::PaymentService;
pub use product::ProductService;
pub use report::ReportService;
