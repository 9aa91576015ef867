// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod event;
pub mod record;

pub use event::ActivityEvent;
pub use record::{ActivityRecord, AttrValue, CityWeatherRecord};
