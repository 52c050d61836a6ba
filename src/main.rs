//! button-fsm demo firmware for nRF52840-DK.
//!
//! Polls the three on-board buttons every millisecond and logs every event
//! over RTT. Each button shows a different configuration:
//!
//! - Button 1: press / long press / repeat / release only
//! - Button 2: normal multi-click + release debounce
//! - Button 3: combined multi-click + release-after-repeat + idle timeout
//!
//! Callbacks run inside the polling task, so they only queue the event;
//! a separate task does the logging.

#![no_std]
#![no_main]

use button_fsm::config::DEFAULT_CLICK_WINDOW_MS;
use button_fsm::{Button, ButtonEvent, ButtonId, ClickMode, EmbassyClock, GpioPin, Polarity};
use defmt::{info, unwrap, warn};
use embassy_executor::Spawner;
use embassy_nrf::gpio::{Input, Pull};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_time::{Duration, Ticker};
use {defmt_rtt as _, panic_probe as _};

type DemoButton = Button<GpioPin<Input<'static>>>;

// nRF52840-DK buttons, all active-low with internal pull-up:
//
//   Button 1 → P0.11
//   Button 2 → P0.12
//   Button 3 → P0.24

/// Poll period of the button task (ms).
const POLL_INTERVAL_MS: u64 = 1;

/// Capacity of the event channel.
const EVENT_QUEUE_LEN: usize = 8;

/// Idle timeout of button 3 (ms).
const IDLE_TIMEOUT_MS: u32 = 30_000;

/// Release debounce of button 2 (ms).
const RELEASE_DEBOUNCE_MS: u32 = 20;

/// Events queued by the callbacks, drained by `report_task`.
static EVENTS: Channel<CriticalSectionRawMutex, (ButtonEvent, ButtonId), EVENT_QUEUE_LEN> =
    Channel::new();

fn forward(event: ButtonEvent, id: ButtonId) {
    if EVENTS.try_send((event, id)).is_err() {
        warn!("event queue full, dropped {} from button {}", event, id);
    }
}

fn on_press(id: ButtonId) {
    forward(ButtonEvent::Press, id);
}

fn on_long_press(id: ButtonId) {
    forward(ButtonEvent::LongPress, id);
}

fn on_repeat(id: ButtonId) {
    forward(ButtonEvent::Repeat, id);
}

fn on_release(id: ButtonId) {
    forward(ButtonEvent::Release, id);
}

fn on_release_after_repeat(id: ButtonId) {
    forward(ButtonEvent::ReleaseAfterRepeat, id);
}

fn on_double_click(id: ButtonId) {
    forward(ButtonEvent::DoubleClick, id);
}

fn on_triple_click(id: ButtonId) {
    forward(ButtonEvent::TripleClick, id);
}

fn on_idle(id: ButtonId) {
    forward(ButtonEvent::Idle, id);
}

fn demo_button(pin: Input<'static>, id: ButtonId) -> DemoButton {
    // DK buttons short to ground.
    let mut button = Button::with_defaults(GpioPin::new(pin, Polarity::ActiveLow), id);
    button.on_press(on_press);
    button.on_long_press(on_long_press);
    button.on_repeat(on_repeat);
    button.on_release(on_release);
    button.on_release_after_repeat(on_release_after_repeat);
    button.on_double_click(on_double_click);
    button.on_triple_click(on_triple_click);
    button
}

/// Poll every button once per tick.
#[embassy_executor::task]
async fn buttons_task(mut buttons: [DemoButton; 3]) -> ! {
    let clock = EmbassyClock;
    let mut ticker = Ticker::every(Duration::from_millis(POLL_INTERVAL_MS));

    loop {
        for button in buttons.iter_mut() {
            if let Err(e) = button.step(&clock) {
                warn!("button {}: step failed: {}", button.id(), e);
            }
        }
        ticker.next().await;
    }
}

/// Log queued button events.
#[embassy_executor::task]
async fn report_task() -> ! {
    loop {
        let (event, id) = EVENTS.receive().await;
        info!("Button {}: {}", id, event);
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_nrf::init(Default::default());
    info!("button-fsm demo starting");

    let mut buttons = [
        demo_button(Input::new(p.P0_11, Pull::Up), 1),
        demo_button(Input::new(p.P0_12, Pull::Up), 2),
        demo_button(Input::new(p.P0_24, Pull::Up), 3),
    ];

    buttons[1].set_multi_click_mode(ClickMode::Normal, DEFAULT_CLICK_WINDOW_MS);
    buttons[1].set_release_debounce_time(RELEASE_DEBOUNCE_MS);

    buttons[2].set_multi_click_mode(ClickMode::Combined, DEFAULT_CLICK_WINDOW_MS);
    buttons[2].set_release_after_repeat(true);
    buttons[2].set_idle_timeout(IDLE_TIMEOUT_MS, Some(on_idle));

    unwrap!(spawner.spawn(report_task()));
    unwrap!(spawner.spawn(buttons_task(buttons)));
}
