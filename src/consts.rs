//! Shared constants for page behaviors.

use std::time::Duration;

// ── Selectors & classes ─────────────────────────────────────────

/// Class carried by every flash notification.
pub const FLASH_MESSAGE_CLASS: &str = "flash-message";

/// Selector for flash notifications already rendered by the server.
pub const FLASH_MESSAGE_SELECTOR: &str = ".flash-message";

/// Class of the container that holds flash notifications.
pub const FLASH_CONTAINER_CLASS: &str = "flash-messages";

/// Selector for the flash container.
pub const FLASH_CONTAINER_SELECTOR: &str = ".flash-messages";

/// Buttons that shrink while pressed.
pub const BUTTON_SELECTOR: &str = ".btn";

/// Cards that lift while hovered.
pub const CARD_SELECTOR: &str = ".feature-card, .dashboard-card";

/// Marker added to `<body>` on touch-capable devices. Styling only.
pub const TOUCH_DEVICE_CLASS: &str = "touch-device";

// ── Transforms ──────────────────────────────────────────────────

/// Button transform while the pointer is held down.
pub const PRESSED_TRANSFORM: &str = "scale(0.95)";

/// Card transform while the pointer is over it.
pub const LIFTED_TRANSFORM: &str = "translateY(-10px)";

/// Flash transform during fade-out: slide fully out horizontally.
pub const FADE_OUT_TRANSFORM: &str = "translateX(100%)";

/// Empty inline value, restoring the stylesheet's natural transform.
pub const NATURAL_TRANSFORM: &str = "";

// ── Timing ──────────────────────────────────────────────────────

/// Time a flash message stays fully visible.
pub const FLASH_DELAY: Duration = Duration::from_millis(5000);

/// Extra delay per server-rendered message so they leave one at a time.
pub const FLASH_STAGGER: Duration = Duration::from_millis(1000);

/// Fade-out length; the element is removed once it elapses.
pub const FLASH_FADE: Duration = Duration::from_millis(300);

// ── UI strings ──────────────────────────────────────────────────

/// Banner shown when the browser comes back online.
pub const CONNECTION_RESTORED: &str = "تم استعادة الاتصال بالإنترنت";

/// Banner shown when the browser goes offline.
pub const CONNECTION_LOST: &str = "فقدان الاتصال بالإنترنت";
