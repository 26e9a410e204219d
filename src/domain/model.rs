// ドメインモデル（エンティティと値オブジェクト）

mod inventory;
mod order;
mod reservation;
mod value_objects;

pub use inventory::{InventoryEntry, RoomAvailability};
pub use order::{Order, OrderDraft};
pub use reservation::ReservationRequest;
pub use value_objects::{BookingSlot, HotelId, OrderId, RoomId};
