pub mod addresses;
pub mod appointments;
pub mod cart_objs;
pub mod likes;
pub mod order_objs;
pub mod orders;
pub mod photos;
pub mod products;
pub mod reviews;
pub mod users;

pub use addresses::Entity as Addresses;
pub use appointments::Entity as Appointments;
pub use cart_objs::Entity as CartObjs;
pub use likes::Entity as Likes;
pub use order_objs::Entity as OrderObjs;
pub use orders::Entity as Orders;
pub use photos::Entity as Photos;
pub use products::Entity as Products;
pub use reviews::Entity as Reviews;
pub use users::Entity as Users;
