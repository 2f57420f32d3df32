//! Automated setup run.

use log::info;
use tokio::time::Instant;

use super::generic::ModemDriver;
use super::response::{SessionReport, SessionStep};
use crate::channel::Channel;
use crate::command::{SETUP_SEQUENCE, SessionParameters};
use crate::error::Result;

impl<C: Channel> ModemDriver<C> {
    /// Issue the setup sequence in order, stopping at the first command that
    /// exhausts its retries.
    ///
    /// `params` fill the context definition; no other command takes arguments.
    pub async fn run_automated(&mut self, params: &SessionParameters) -> Result<SessionReport> {
        let start = Instant::now();
        let argument = params.to_argument();
        let mut steps = Vec::with_capacity(SETUP_SEQUENCE.len());

        for &key in SETUP_SEQUENCE {
            let argument = key
                .takes_session_parameters()
                .then_some(argument.as_str());

            if let Some(response) = self.send_key(key, argument).await? {
                steps.push(SessionStep { key, response });
            }
        }

        let report = SessionReport {
            steps,
            elapsed: start.elapsed(),
        };
        info!(
            "test finished: {} commands, {} attempts, {:?}",
            report.steps.len(),
            report.total_attempts(),
            report.elapsed
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::scripted::ScriptedChannel;
    use crate::command::CommandKey;
    use crate::driver::DriverBuilder;

    const REPLIES: &[&str] = &[
        "\r\nOK\r\n",
        "ATE0\r\r\nOK\r\n",
        "\r\n+CPIN: READY\r\n\r\nOK\r\n",
        "\r\n+CREG: 0,1\r\n\r\nOK\r\n",
        "\r\n+QGSN: 866758040000000\r\n\r\nOK\r\n",
        "\r\nOK\r\n",
        "\r\n+CCLK: \"26/10/17,09:30:00+12\"\r\n\r\nOK\r\n",
        "\r\n+CGATT: 1\r\n\r\nOK\r\n",
        "\r\nOK\r\n",
        "\r\nOK\r\n",
        "\r\nOK\r\n\r\nCONNECT OK\r\n",
        "\r\nDEACT OK\r\n",
    ];

    fn healthy_modem() -> ScriptedChannel {
        REPLIES
            .iter()
            .fold(ScriptedChannel::new(), |channel, reply| channel.reply(&[(30, *reply)]))
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_sequence_in_order() {
        let mut driver = DriverBuilder::new().build(healthy_modem()).unwrap();
        let params = SessionParameters::new(1, "IP", "internet");

        let report = driver.run_automated(&params).await.unwrap();

        assert_eq!(
            driver.channel().writes(),
            vec![
                "AT+IPR=115200\r\n",
                "ATE0\r\n",
                "AT+CPIN?\r\n",
                "AT+CREG?\r\n",
                "AT+QGSN\r\n",
                "AT+CTZU=3\r\n",
                "AT+CCLK?\r\n",
                "AT+CGATT?\r\n",
                "AT+CGDCONT=1,\"IP\",\"internet\"\r\n",
                "AT+CGACT=1,1\r\n",
                "AT+QIOPEN\r\n",
                "AT+QIDEACT\r\n",
            ]
        );
        assert_eq!(report.steps.len(), SETUP_SEQUENCE.len());
        assert_eq!(report.total_attempts(), SETUP_SEQUENCE.len() as u32);
        assert!(report.response(CommandKey::Identity).unwrap().contains("866758040000000"));
        assert!(report.response(CommandKey::Error).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_parameters_reach_context_definition() {
        let mut driver = DriverBuilder::new().build(healthy_modem()).unwrap();
        let params = SessionParameters::new(2, "IPV6", "m2m.example");

        let report = driver.run_automated(&params).await.unwrap();
        let define = report.response(CommandKey::DefineContext).unwrap();
        assert_eq!(define.command, "AT+CGDCONT=2,\"IPV6\",\"m2m.example\"");
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_stops_at_exhausted_command() {
        // SIM never becomes ready
        let channel = ScriptedChannel::new()
            .reply(&[(30, "\r\nOK\r\n")])
            .reply(&[(30, "\r\nOK\r\n")])
            .reply(&[(30, "\r\n+CME ERROR: 10\r\n")])
            .reply(&[(30, "\r\n+CME ERROR: 10\r\n")])
            .reply(&[(30, "\r\n+CME ERROR: 10\r\n")]);
        let mut driver = DriverBuilder::new().build(channel).unwrap();

        let err = driver
            .run_automated(&SessionParameters::default())
            .await
            .unwrap_err();

        assert!(err.is_retries_exhausted());
        let writes = driver.channel().writes();
        assert_eq!(writes.len(), 5);
        assert!(writes[2..].iter().all(|w| w == "AT+CPIN?\r\n"));
    }
}
