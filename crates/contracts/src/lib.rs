//! Общие типы CRM: агрегаты лидов и сделок, перечисления, фильтры списков.
//!
//! Крейт не выполняет ввода-вывода и используется как backend, так и любым
//! клиентом, которому нужна та же логика фильтрации.

pub mod domain;
pub mod enums;
pub mod shared;
