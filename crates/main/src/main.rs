// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use anyhow::Result;
use controller::Controller;

#[tokio::main]
async fn main() {
    controller::try_or_exit(run()).await;
}

async fn run() -> Result<()> {
    if let Some(controller) = Controller::create("Check-in Portal").await? {
        controller.run().await?;
    }

    Ok(())
}
