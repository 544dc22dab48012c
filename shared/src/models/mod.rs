//! Data models
//!
//! Entity structs plus their Create/Update payloads. Row types derive
//! `sqlx::FromRow` behind the `db` feature so client-side code can use
//! the same structs without pulling in the database stack.

pub mod cart;
pub mod meal;
pub mod order;
pub mod reservation;
pub mod restaurant;
pub mod restaurant_meal;

pub use cart::{CartLine, CartLineCreate, CartLineUpdate, CartLineWithMeal, CartSummary};
pub use meal::{Meal, MealCreate, MealUpdate};
pub use order::{
    CardDetails, CardSummary, CheckoutRequest, CustomerInfo, Order, PaymentDetails,
    PaymentIntent, PaymentMethod, PaymentMethodSummary, PaymentRequest,
};
pub use reservation::{Reservation, ReservationCreate, ReservationUpdate, ReservationWithRestaurant};
pub use restaurant::{Restaurant, RestaurantCreate, RestaurantUpdate};
pub use restaurant_meal::{
    RestaurantMeal, RestaurantMealCreate, RestaurantMealUpdate, RestaurantMealWithNames,
};
