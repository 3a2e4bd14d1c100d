//! Телеграм-бот-помощник: планы, прогноз погоды, коммиты GitHub и
//! уведомления о тревогах с пошаговым выбором региона (область → район →
//! город).
//!
//! Module layout:
//! - [`core`]: конфигурация, ошибки, логирование
//! - [`storage`]: SQLite (пул соединений, миграции, планы, регионы)
//! - [`services`]: клиенты внешних API и форматирование ответов
//! - [`wizard`]: чистая логика пошагового выбора региона
//! - [`telegram`]: бот, клавиатуры, состояния диалога и обработчики

pub mod core;
pub mod services;
pub mod storage;
pub mod telegram;
pub mod wizard;
