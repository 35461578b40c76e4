//! Single-writer cell holding the wallet's total USD value.

use rust_decimal::Decimal;
use tokio::sync::watch;

/// Creates a cell starting at zero.
///
/// The publisher is not `Clone`, so whoever owns it is the only writer.
/// Readers clone freely.
#[must_use]
pub fn wallet_value_cell() -> (WalletValuePublisher, WalletValueReader) {
    let (tx, rx) = watch::channel(Decimal::ZERO);
    (WalletValuePublisher { tx }, WalletValueReader { rx })
}

/// Write side of the wallet value cell.
#[derive(Debug)]
pub struct WalletValuePublisher {
    tx: watch::Sender<Decimal>,
}

impl WalletValuePublisher {
    /// Replaces the value, notifying readers.
    pub fn publish(&self, total: Decimal) {
        self.tx.send_replace(total);
    }

    /// Latest published value.
    pub fn current(&self) -> Decimal {
        *self.tx.borrow()
    }

    /// A new reader.
    pub fn subscribe(&self) -> WalletValueReader {
        WalletValueReader {
            rx: self.tx.subscribe(),
        }
    }
}

/// Read side of the wallet value cell.
#[derive(Debug, Clone)]
pub struct WalletValueReader {
    rx: watch::Receiver<Decimal>,
}

impl WalletValueReader {
    /// Latest published value.
    pub fn current(&self) -> Decimal {
        *self.rx.borrow()
    }

    /// Waits for the next publication and returns it.
    ///
    /// `None` once the publisher is gone.
    pub async fn changed(&mut self) -> Option<Decimal> {
        self.rx.changed().await.ok()?;
        Some(*self.rx.borrow_and_update())
    }
}
