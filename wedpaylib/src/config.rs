//! Конфигурация свадебного сайта и реактивное хранилище с подписчиками.
//!
//! Ядро генерации payload отсюда ничего не читает; связь одна — [`WeddingConfig::gift_payload`].

use crate::{
    color::hex_to_oklch,
    emv::payload::generate_payload,
    error::{Result, WedpayError},
};
use chrono::{Duration, Local, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

const LOCAL_MINUTES: &str = "%Y-%m-%dT%H:%M";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Section {
    Countdown,
    EventDetails,
    Schedule,
    Map,
    Gallery,
    Video,
    #[serde(rename = "QRCode")]
    QrCode,
    #[serde(rename = "RSVP")]
    Rsvp,
    Guestbook,
}

impl Section {
    pub const DEFAULT_ORDER: [Section; 9] = [
        Section::Countdown,
        Section::EventDetails,
        Section::Schedule,
        Section::Map,
        Section::Gallery,
        Section::Video,
        Section::QrCode,
        Section::Rsvp,
        Section::Guestbook,
    ];
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    #[default]
    Th,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BankAccount {
    pub bank_name: String,
    pub account_name: String,
    /// Прокси PromptPay: телефон, национальный ID или e-wallet в любом написании.
    pub account_number: String,
}

impl Default for BankAccount {
    fn default() -> Self {
        Self {
            bank_name: "Bank".into(),
            account_name: "Name".into(),
            account_number: "123-456-7890".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScheduleItem {
    pub time: String,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct WeddingConfig {
    pub groom_name: String,
    pub groom_nickname: String,
    pub bride_name: String,
    pub bride_nickname: String,
    /// Локальное время, `YYYY-MM-DDTHH:MM`.
    pub wedding_date: String,
    pub wedding_location: String,
    /// Имя темы или `#hex` для своей палитры.
    pub theme_color: String,
    pub description: String,
    pub show_gallery: bool,
    pub show_guestbook: bool,
    #[serde(rename = "showRSVP")]
    pub show_rsvp: bool,
    pub show_video: bool,
    pub show_map: bool,
    pub show_countdown: bool,
    pub show_event_details: bool,
    pub show_schedule: bool,
    #[serde(rename = "showQRCode")]
    pub show_qr_code: bool,
    pub qr_code_start_time: String,
    pub qr_code_end_time: String,
    pub video_url: String,
    pub gallery_images: Vec<String>,
    pub bank_account: BankAccount,
    pub schedule: Vec<ScheduleItem>,
    pub section_order: Vec<Section>,
}

impl Default for WeddingConfig {
    fn default() -> Self {
        let now = Local::now().naive_local();
        let start = now.format(LOCAL_MINUTES).to_string();
        let end = (now + Duration::days(365)).format(LOCAL_MINUTES).to_string();

        Self {
            groom_name: "Groom Name".into(),
            groom_nickname: "Groom".into(),
            bride_name: "Bride Name".into(),
            bride_nickname: "Bride".into(),
            wedding_date: start.clone(),
            wedding_location: "Wedding Venue".into(),
            theme_color: "valentine".into(),
            description: "We invite you to celebrate our wedding.".into(),
            show_gallery: true,
            show_guestbook: true,
            show_rsvp: true,
            show_video: true,
            show_map: true,
            show_countdown: true,
            show_event_details: true,
            show_schedule: true,
            show_qr_code: true,
            qr_code_start_time: start,
            qr_code_end_time: end,
            video_url: String::new(),
            gallery_images: Vec::new(),
            bank_account: BankAccount::default(),
            schedule: Vec::new(),
            section_order: Section::DEFAULT_ORDER.to_vec(),
        }
    }
}

/// Локальное время `YYYY-MM-DDTHH:MM`, секунды необязательны.
pub fn parse_local(s: &str, what: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, LOCAL_MINUTES)
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
        .map_err(|e| WedpayError::Parse(format!("{what} {s:?}: {e}")))
}

impl WeddingConfig {
    pub fn from_reader<R: Read>(r: R) -> Result<Self> {
        Ok(serde_json::from_reader(r)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading wedding config");
        Self::from_reader(BufReader::new(File::open(path)?))
    }

    pub fn qr_window(&self) -> Result<(NaiveDateTime, NaiveDateTime)> {
        Ok((
            parse_local(&self.qr_code_start_time, "qrCodeStartTime")?,
            parse_local(&self.qr_code_end_time, "qrCodeEndTime")?,
        ))
    }

    /// Начало включительно, конец — нет.
    pub fn qr_window_open(&self, now: NaiveDateTime) -> Result<bool> {
        let (start, end) = self.qr_window()?;
        Ok(start <= now && now < end)
    }

    /// Payload PromptPay для подарка на счёт из `bank_account`.
    /// Пусто, если секция QR выключена или номер не содержит цифр.
    pub fn gift_payload(&self, amount: Option<Decimal>) -> String {
        if !self.show_qr_code {
            return String::new();
        }
        generate_payload(&self.bank_account.account_number, amount)
    }
}

/* ------------------------------- STORE ---------------------------------- */

pub type SubscriptionId = u64;

type Observer<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Одна доставка: значение и подписчики, снятые в момент записи.
struct Delivery<T> {
    value: T,
    observers: Vec<(SubscriptionId, Observer<T>)>,
}

struct Inner<T> {
    value: T,
    observers: Vec<(SubscriptionId, Observer<T>)>,
    next_id: SubscriptionId,
    queue: VecDeque<Delivery<T>>,
    draining: bool,
}

/// Контейнер состояния: get/set/update/subscribe.
/// Подписчик вызывается сразу с текущим значением и затем при каждом изменении.
///
/// Запись и постановка доставки в очередь идут под одной блокировкой, поэтому подписчики
/// видят изменения в порядке записи. Очередь разбирает один поток за раз, вне блокировки:
/// подписчик может снова писать в store, его запись доставится следующей.
pub struct Store<T> {
    inner: Mutex<Inner<T>>,
}

impl<T: Clone + Default> Default for Store<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// Снимает флаг разбора, если подписчик запаниковал.
struct DrainGuard<'a, T> {
    store: &'a Store<T>,
    armed: bool,
}

impl<T> Drop for DrainGuard<'_, T> {
    fn drop(&mut self) {
        if self.armed {
            let mut inner = self.store.inner.lock().unwrap_or_else(PoisonError::into_inner);
            inner.draining = false;
            inner.queue.clear();
        }
    }
}

impl<T: Clone> Store<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Mutex::new(Inner {
                value,
                observers: Vec::new(),
                next_id: 1,
                queue: VecDeque::new(),
                draining: false,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner<T>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get(&self) -> T {
        self.lock().value.clone()
    }

    pub fn set(&self, value: T) {
        self.update(|v| *v = value);
    }

    pub fn update(&self, f: impl FnOnce(&mut T)) {
        let mut inner = self.lock();
        f(&mut inner.value);
        let delivery = Delivery {
            value: inner.value.clone(),
            observers: inner.observers.clone(),
        };
        inner.queue.push_back(delivery);
        self.drain(inner);
    }

    pub fn subscribe(&self, observer: impl Fn(&T) + Send + Sync + 'static) -> SubscriptionId {
        let observer: Observer<T> = Arc::new(observer);

        let mut inner = self.lock();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.observers.push((id, Arc::clone(&observer)));
        // первый вызов встаёт в ту же очередь, что и записи: ни одно изменение не теряется
        let delivery = Delivery {
            value: inner.value.clone(),
            observers: vec![(id, observer)],
        };
        inner.queue.push_back(delivery);
        self.drain(inner);
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut inner = self.lock();
        let before = inner.observers.len();
        inner.observers.retain(|(i, _)| *i != id);
        inner.observers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock().observers.len()
    }

    fn drain<'a>(&'a self, mut inner: MutexGuard<'a, Inner<T>>) {
        if inner.draining {
            return;
        }
        inner.draining = true;
        let mut guard = DrainGuard { store: self, armed: true };

        loop {
            let Some(mut delivery) = inner.queue.pop_front() else {
                inner.draining = false;
                guard.armed = false;
                return;
            };
            // отписавшиеся до доставки её не получают
            delivery
                .observers
                .retain(|(id, _)| inner.observers.iter().any(|(i, _)| i == id));
            drop(inner);

            for (_, o) in &delivery.observers {
                o(&delivery.value);
            }
            inner = self.lock();
        }
    }
}

/* ------------------------------- THEME ---------------------------------- */

/// Поверхность отрисовки, на которую ложится тема (корневой элемент страницы и т.п.).
pub trait ThemeSurface {
    fn set_attribute(&mut self, name: &str, value: &str);
    fn set_property(&mut self, name: &str, value: &str);
}

/// Поверхность в памяти: для тестов и безголового рендеринга.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySurface {
    pub attributes: BTreeMap<String, String>,
    pub properties: BTreeMap<String, String>,
}

impl ThemeSurface for MemorySurface {
    fn set_attribute(&mut self, name: &str, value: &str) {
        self.attributes.insert(name.to_string(), value.to_string());
    }

    fn set_property(&mut self, name: &str, value: &str) {
        self.properties.insert(name.to_string(), value.to_string());
    }
}

pub const THEME_ATTRIBUTE: &str = "data-theme";
pub const CUSTOM_THEME: &str = "custom";
pub const PRIMARY_PROPERTY: &str = "--p";

/// Именованная тема идёт в `data-theme` как есть; `#hex` — тема `custom`
/// с основным цветом в Oklch. Битый hex поверхность не трогает.
pub fn apply_theme<S: ThemeSurface + ?Sized>(surface: &mut S, theme_color: &str) {
    if !theme_color.starts_with('#') {
        surface.set_attribute(THEME_ATTRIBUTE, theme_color);
        return;
    }
    match hex_to_oklch(theme_color) {
        Ok(oklch) => {
            surface.set_attribute(THEME_ATTRIBUTE, CUSTOM_THEME);
            surface.set_property(PRIMARY_PROPERTY, &oklch.to_string());
        }
        Err(e) => tracing::warn!(%theme_color, error = %e, "theme color ignored"),
    }
}

/// Подписчик для `Store<WeddingConfig>`, применяющий тему к поверхности.
pub fn theme_observer<S>(surface: Arc<Mutex<S>>) -> impl Fn(&WeddingConfig) + Send + Sync + 'static
where
    S: ThemeSurface + Send + 'static,
{
    move |cfg: &WeddingConfig| {
        let mut s = surface.lock().unwrap_or_else(PoisonError::into_inner);
        apply_theme(&mut *s, &cfg.theme_color);
    }
}
