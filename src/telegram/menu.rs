//! Reply keyboards and their button labels
//!
//! Button labels double as routing keys: the dispatcher matches incoming
//! text against these exact strings before consulting dialogue state, so
//! «Назад» escapes any stage.

use teloxide::types::{KeyboardButton, KeyboardMarkup};

pub mod buttons {
    pub const PLANS: &str = "📅 Планы";
    pub const WEATHER: &str = "🌦 Прогноз погоды";
    pub const GITHUB: &str = "🐙 GitHub Коммиты";
    pub const ALERTS: &str = "🚨 Уведомления о тревогах";

    pub const PLAN_ADD: &str = "➕Добавить план";
    pub const PLAN_EDIT: &str = "✏️Изменить план";
    pub const PLAN_DELETE: &str = "🗑️Удалить план";
    pub const PLAN_LIST: &str = "📋Список планов";

    pub const ALERT_CHECK_NOW: &str = "🔔 Проверить сейчас";
    pub const ALERT_CHANGE_REGION: &str = "✏️ Изменить регион";

    // Both spellings exist on keyboards users may still have open.
    pub const BACK: &str = "🔙Назад";
    pub const BACK_SPACED: &str = "🔙 Назад";
}

/// True when the text is one of our keyboard buttons.
pub fn is_menu_button(text: &str) -> bool {
    matches!(
        text,
        buttons::PLANS
            | buttons::WEATHER
            | buttons::GITHUB
            | buttons::ALERTS
            | buttons::PLAN_ADD
            | buttons::PLAN_EDIT
            | buttons::PLAN_DELETE
            | buttons::PLAN_LIST
            | buttons::ALERT_CHECK_NOW
            | buttons::ALERT_CHANGE_REGION
            | buttons::BACK
            | buttons::BACK_SPACED
    )
}

fn keyboard(rows: Vec<Vec<&str>>) -> KeyboardMarkup {
    KeyboardMarkup::new(
        rows.into_iter()
            .map(|row| row.into_iter().map(KeyboardButton::new).collect::<Vec<_>>()),
    )
    .resize_keyboard()
}

/// Главное меню бота.
pub fn main_menu() -> KeyboardMarkup {
    keyboard(vec![
        vec![buttons::PLANS],
        vec![buttons::WEATHER],
        vec![buttons::GITHUB],
        vec![buttons::ALERTS],
    ])
}

/// Подменю работы с планами.
pub fn plan_menu() -> KeyboardMarkup {
    keyboard(vec![
        vec![buttons::PLAN_ADD],
        vec![buttons::PLAN_EDIT],
        vec![buttons::PLAN_DELETE],
        vec![buttons::PLAN_LIST],
        vec![buttons::BACK],
    ])
}

/// Подменю тревог для пользователя с выбранным регионом.
pub fn alert_menu() -> KeyboardMarkup {
    keyboard(vec![
        vec![buttons::BACK_SPACED],
        vec![buttons::ALERT_CHECK_NOW],
        vec![buttons::ALERT_CHANGE_REGION],
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_button_routes() {
        for label in [
            buttons::PLANS,
            buttons::WEATHER,
            buttons::GITHUB,
            buttons::ALERTS,
            buttons::PLAN_ADD,
            buttons::PLAN_EDIT,
            buttons::PLAN_DELETE,
            buttons::PLAN_LIST,
            buttons::ALERT_CHECK_NOW,
            buttons::ALERT_CHANGE_REGION,
            buttons::BACK,
            buttons::BACK_SPACED,
        ] {
            assert!(is_menu_button(label), "unrouted button: {}", label);
        }
    }

    #[test]
    fn test_free_text_is_not_a_button() {
        assert!(!is_menu_button("Kyiv Oblast"));
        assert!(!is_menu_button(""));
    }
}
