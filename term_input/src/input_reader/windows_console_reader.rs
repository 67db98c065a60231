// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words CONIN conin HANDLE

//! Windows console reader. Waits on the console input handle and a manual reset
//! cancel event together, then reads input records in batches.

use super::{ConsoleRecord, ConsoleRecordTranslator, KeyRecord, MouseRecord, RawEventReader,
            ReadCanceler, ReadError, ReaderSetupError};
use crate::InputEvent;
use std::{ptr,
          sync::{Arc,
                 atomic::{AtomicBool, Ordering}}};
use windows_sys::Win32::{Foundation::{CloseHandle, HANDLE, INVALID_HANDLE_VALUE,
                                      WAIT_FAILED, WAIT_OBJECT_0},
                         System::{Console::{GetStdHandle, INPUT_RECORD, ReadConsoleInputW,
                                            STD_INPUT_HANDLE},
                                  Threading::{CreateEventW, INFINITE, SetEvent,
                                              WaitForMultipleObjects}}};

/// Records read per `ReadConsoleInputW` call.
pub const CONSOLE_READ_BATCH_SIZE: usize = 16;

const KEY_EVENT: u16 = 0x0001;
const MOUSE_EVENT: u16 = 0x0002;
const WINDOW_BUFFER_SIZE_EVENT: u16 = 0x0004;
const MENU_EVENT: u16 = 0x0008;
const FOCUS_EVENT: u16 = 0x0010;

/// Owns a Win32 event handle. Stored as `usize` so it can cross threads.
#[derive(Debug)]
struct OwnedEvent(usize);

impl OwnedEvent {
    fn handle(&self) -> HANDLE { self.0 as HANDLE }
}

impl Drop for OwnedEvent {
    fn drop(&mut self) {
        // SAFETY: the handle came from `CreateEventW` and is closed exactly once.
        unsafe { CloseHandle(self.handle()) };
    }
}

/// Signals the cancel event. Manual reset, so it stays signaled for every later wait.
#[derive(Debug)]
pub struct ConsoleEventCanceler {
    cancel_event: OwnedEvent,
    is_canceled: AtomicBool,
}

impl ReadCanceler for ConsoleEventCanceler {
    fn cancel(&self) {
        self.is_canceled.store(true, Ordering::Release);
        // SAFETY: the event handle stays open for as long as `self` lives.
        unsafe { SetEvent(self.cancel_event.handle()) };
    }

    fn is_canceled(&self) -> bool { self.is_canceled.load(Ordering::Acquire) }
}

#[derive(Debug)]
pub struct WindowsConsoleReader {
    /// Console input handle, owned by the process (never closed here).
    console_input: usize,
    canceler: Arc<ConsoleEventCanceler>,
    translator: ConsoleRecordTranslator,
}

impl WindowsConsoleReader {
    /// Reads from the process' console input handle.
    ///
    /// # Errors
    ///
    /// Returns [`ReaderSetupError`] if the console handle is missing or the cancel
    /// event can't be created.
    pub fn from_console_input() -> Result<Self, ReaderSetupError> {
        // SAFETY: plain FFI call with a constant argument.
        let console_input = unsafe { GetStdHandle(STD_INPUT_HANDLE) };
        if console_input.is_null() || console_input == INVALID_HANDLE_VALUE {
            return Err(ReaderSetupError::InputHandle(std::io::Error::last_os_error()));
        }

        // Manual reset, initially not signaled, unnamed.
        // SAFETY: null security attributes and name are allowed.
        let cancel_event = unsafe { CreateEventW(ptr::null(), 1, 0, ptr::null()) };
        if cancel_event.is_null() {
            return Err(ReaderSetupError::CancelEventCreation(
                std::io::Error::last_os_error(),
            ));
        }

        Ok(Self {
            console_input: console_input as usize,
            canceler: Arc::new(ConsoleEventCanceler {
                cancel_event: OwnedEvent(cancel_event as usize),
                is_canceled: AtomicBool::new(false),
            }),
            translator: ConsoleRecordTranslator::default(),
        })
    }

    /// Blocks until console input is available or the cancel event is signaled.
    fn wait_for_input(&self) -> Result<(), ReadError> {
        let handles: [HANDLE; 2] = [
            self.console_input as HANDLE,
            self.canceler.cancel_event.handle(),
        ];
        // SAFETY: both handles are valid for the duration of the call.
        let result = unsafe { WaitForMultipleObjects(2, handles.as_ptr(), 0, INFINITE) };
        match result {
            WAIT_FAILED => Err(ReadError::Io(std::io::Error::last_os_error())),
            it if it == WAIT_OBJECT_0 + 1 => Err(ReadError::Canceled),
            _ => Ok(()),
        }
    }

    fn read_records(&mut self, out: &mut Vec<InputEvent>) -> Result<(), ReadError> {
        // SAFETY: INPUT_RECORD is plain old data, all zeroes is a valid value.
        let mut records: [INPUT_RECORD; CONSOLE_READ_BATCH_SIZE] =
            unsafe { std::mem::zeroed() };
        let mut count: u32 = 0;
        // SAFETY: the buffer holds `records_capacity(&records)` records.
        let is_ok = unsafe {
            ReadConsoleInputW(
                self.console_input as HANDLE,
                records.as_mut_ptr(),
                records_capacity(&records),
                &mut count,
            )
        };
        if is_ok == 0 {
            return Err(ReadError::Io(std::io::Error::last_os_error()));
        }

        for record in records.iter().take(records_read(count, records.len())) {
            self.translator.translate(&console_record_from(record), out);
        }
        Ok(())
    }
}

/// Length argument for `ReadConsoleInputW`, never more than `records` can hold.
fn records_capacity(records: &[INPUT_RECORD]) -> u32 {
    u32::try_from(records.len()).unwrap_or(u32::MAX)
}

/// Number of records to translate, clamped to the buffer length.
fn records_read(count: u32, capacity: usize) -> usize {
    usize::try_from(count).map_or(capacity, |count| count.min(capacity))
}

fn console_record_from(record: &INPUT_RECORD) -> ConsoleRecord {
    // SAFETY: `EventType` says which union field is initialized.
    unsafe {
        match record.EventType {
            KEY_EVENT => {
                let key = record.Event.KeyEvent;
                ConsoleRecord::Key(KeyRecord {
                    key_down: key.bKeyDown != 0,
                    repeat_count: key.wRepeatCount,
                    virtual_key_code: key.wVirtualKeyCode,
                    unicode_char: key.uChar.UnicodeChar,
                    control_key_state: key.dwControlKeyState,
                })
            }
            MOUSE_EVENT => {
                let mouse = record.Event.MouseEvent;
                ConsoleRecord::Mouse(MouseRecord {
                    col: mouse.dwMousePosition.X,
                    row: mouse.dwMousePosition.Y,
                    button_state: mouse.dwButtonState,
                    control_key_state: mouse.dwControlKeyState,
                    event_flags: mouse.dwEventFlags,
                })
            }
            WINDOW_BUFFER_SIZE_EVENT => {
                let size = record.Event.WindowBufferSizeEvent.dwSize;
                ConsoleRecord::WindowBufferSize {
                    cols: size.X,
                    rows: size.Y,
                }
            }
            FOCUS_EVENT => ConsoleRecord::Focus {
                is_gained: record.Event.FocusEvent.bSetFocus != 0,
            },
            MENU_EVENT => ConsoleRecord::Menu,
            other => ConsoleRecord::Other(other),
        }
    }
}

impl RawEventReader for WindowsConsoleReader {
    fn read_events(&mut self, out: &mut Vec<InputEvent>) -> Result<(), ReadError> {
        let count_before = out.len();
        while out.len() == count_before {
            if self.canceler.is_canceled() {
                return Err(ReadError::Canceled);
            }
            self.wait_for_input()?;
            self.read_records(out)?;
        }
        Ok(())
    }

    fn canceler(&self) -> Arc<dyn ReadCanceler> { self.canceler.clone() }
}
