// Focused managers for channel lifecycle
//
// Extracted from the engine handle to keep orchestration code small and
// each manager single-responsibility.

mod broadcast_manager;

pub use broadcast_manager::BroadcastChannelManager;
