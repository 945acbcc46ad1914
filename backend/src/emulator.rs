//! The pluggable emulator back end (spec §4.7/§4.12): press a button,
//! advance frames, and hand back the full 64 KiB RAM snapshot. The tick
//! processor and game-state service only ever see this trait, so the real
//! emulator integration can be swapped in without touching either.

use async_trait::async_trait;
use protocol::Action;

#[async_trait]
pub trait Emulator: Send + Sync {
    async fn press(&self, action: Action);
    async fn advance_frames(&self, frames: u32);
    async fn read_ram(&self) -> Vec<u8>;
}

pub mod mock {
    use super::*;
    use tokio::sync::Mutex;

    /// In-memory emulator used by tests and local dev (spec §4.16): holds a
    /// fixed 64 KiB buffer that test setup pokes directly, and records every
    /// press/advance call for assertions.
    pub struct MockEmulator {
        ram: Mutex<Vec<u8>>,
        presses: Mutex<Vec<Action>>,
        frames_advanced: Mutex<u32>,
    }

    impl Default for MockEmulator {
        fn default() -> Self {
            Self {
                ram: Mutex::new(vec![0u8; decoder::addresses::RAM_SIZE]),
                presses: Mutex::new(Vec::new()),
                frames_advanced: Mutex::new(0),
            }
        }
    }

    impl MockEmulator {
        pub fn new() -> Self {
            Self::default()
        }

        pub async fn set_ram(&self, ram: Vec<u8>) {
            *self.ram.lock().await = ram;
        }

        pub async fn presses(&self) -> Vec<Action> {
            self.presses.lock().await.clone()
        }

        pub async fn frames_advanced(&self) -> u32 {
            *self.frames_advanced.lock().await
        }
    }

    #[async_trait]
    impl Emulator for MockEmulator {
        async fn press(&self, action: Action) {
            self.presses.lock().await.push(action);
        }

        async fn advance_frames(&self, frames: u32) {
            *self.frames_advanced.lock().await += frames;
        }

        async fn read_ram(&self) -> Vec<u8> {
            self.ram.lock().await.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockEmulator;
    use super::*;

    #[tokio::test]
    async fn mock_emulator_records_presses_and_frames() {
        let emulator = MockEmulator::new();
        emulator.press(Action::Up).await;
        emulator.advance_frames(6).await;
        assert_eq!(emulator.presses().await, vec![Action::Up]);
        assert_eq!(emulator.frames_advanced().await, 6);
    }

    #[tokio::test]
    async fn mock_emulator_ram_round_trips() {
        let emulator = MockEmulator::new();
        let mut ram = vec![0u8; decoder::addresses::RAM_SIZE];
        ram[0xD000] = 1;
        emulator.set_ram(ram.clone()).await;
        assert_eq!(emulator.read_ram().await, ram);
    }
}
