use super::r#trait::HostBridgeTrait;
use super::wait_for_release;
use crate::config::Config;
use crate::error::Result;
use crate::events::{HostCommand, InboundEvent};
use crate::services::dock::{DockEngine, DockEntry, DockOutput, DockStatus, SystemClock};
use serde::Serialize;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{error, info, warn};

/// Исходящая строка JSON-lines
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
enum OutboundFrame {
    Command(HostCommand),
    Render { render: Vec<DockEntry> },
    Status { status: StatusFrame },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct StatusFrame {
    index: usize,
    status: DockStatus,
}

/// Кадры копятся за одно событие и пишутся в порядке появления
#[derive(Debug, Default)]
struct FrameBuffer {
    frames: Vec<OutboundFrame>,
}

impl DockOutput for FrameBuffer {
    fn render(&mut self, entries: &[DockEntry]) {
        self.frames.push(OutboundFrame::Render {
            render: entries.to_vec(),
        });
    }

    fn set_status(&mut self, index: usize, status: DockStatus) {
        self.frames.push(OutboundFrame::Status {
            status: StatusFrame { index, status },
        });
    }

    fn send(&mut self, command: HostCommand) {
        self.frames.push(OutboundFrame::Command(command));
    }
}

/// Мост через stdin/stdout: хост пишет события построчно в JSON,
/// в ответ получает команды и кадры отрисовки
pub struct StdioBridge {
    config: Arc<Config>,
    engine: DockEngine<SystemClock>,
}

impl StdioBridge {
    pub fn new(config: Arc<Config>) -> Result<Self> {
        info!(
            "Инициализация StdioBridge (блокировка после клика: {}мс)",
            config.dock.debounce_ms
        );

        let engine = DockEngine::new(SystemClock, config.debounce_interval());
        Ok(Self { config, engine })
    }

    async fn run_impl(mut self) -> Result<()> {
        let reader = BufReader::new(tokio::io::stdin());
        self.serve(reader, tokio::io::stdout()).await
    }

    async fn serve<R, W>(&mut self, reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        // Сырые сегменты: не-UTF-8 строка пропускается в handle_line, а не рвёт цикл
        let mut lines = reader.split(b'\n');
        let mut frames = FrameBuffer::default();

        if self.config.bridge.request_on_start {
            self.engine.request_dock_apps(&mut frames);
        }
        write_frames(&mut writer, &mut frames).await;

        loop {
            let deadline = self.engine.lock_deadline();

            tokio::select! {
                line = lines.next_segment() => {
                    match line? {
                        Some(line) => self.handle_line(&line, &mut frames),
                        None => {
                            info!("Хост закрыл stdin, завершаем мост");
                            break;
                        }
                    }
                }
                _ = wait_for_release(deadline) => {
                    self.engine.expire_lock();
                }
            }

            write_frames(&mut writer, &mut frames).await;
        }

        Ok(())
    }

    fn handle_line(&mut self, line: &[u8], frames: &mut FrameBuffer) {
        match InboundEvent::parse_line(line) {
            Ok(Some(event)) => self.engine.handle(event, frames),
            Ok(None) => {}
            Err(e) => warn!("Некорректное сообщение от хоста пропущено: {}", e),
        }
    }
}

async fn write_frames<W: AsyncWrite + Unpin>(writer: &mut W, frames: &mut FrameBuffer) {
    for frame in frames.frames.drain(..) {
        if let Err(e) = write_frame(writer, &frame).await {
            error!("Не удалось отправить кадр {:?}: {}", frame, e);
        }
    }
}

async fn write_frame<W: AsyncWrite + Unpin>(writer: &mut W, frame: &OutboundFrame) -> Result<()> {
    let mut line = serde_json::to_vec(frame)?;
    line.push(b'\n');
    writer.write_all(&line).await?;
    writer.flush().await?;
    Ok(())
}

#[async_trait::async_trait]
impl HostBridgeTrait for StdioBridge {
    async fn run(self: Box<Self>) -> Result<()> {
        (*self).run_impl().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::time::Duration;
    use tokio::io::{duplex, split, DuplexStream, Lines, ReadHalf, WriteHalf};
    use tokio::time::{sleep, timeout};

    async fn run_session(config: Config, input: &[u8]) -> Vec<Value> {
        let mut bridge = StdioBridge::new(Arc::new(config)).unwrap();
        let mut output = Vec::new();
        bridge.serve(input, &mut output).await.unwrap();

        String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_session_over_json_lines() {
        let input = concat!(
            r#"{"event":"dock_data","apps":[{"name":"Firefox","icon":"firefox","exec":"firefox"}]}"#, "\n",
            r#"{"event":"running_windows","windows":[{"handle":1,"class":"Firefox"},{"xid":2,"class":"gimp","focused":true}]}"#, "\n",
            r#"{"event":"running_windows","windows":[{"handle":1,"class":"Firefox"},{"xid":2,"class":"gimp","focused":true}]}"#, "\n",
            r#"{"event":"click","index":0}"#, "\n",
            r#"{"event":"running_windows","windows":[{"handle":1,"class":"Firefox","focused":true}]}"#, "\n",
        );

        let frames = run_session(Config::default(), input.as_bytes()).await;

        assert_eq!(frames[0], json!({"action": "get_dock_apps"}));
        // Пустой пуш после замены закреплённых приложений
        assert_eq!(frames[1]["render"][0]["status"], "none");
        assert_eq!(frames[2]["render"][0]["status"], "running");
        assert_eq!(frames[2]["render"][1]["kind"], "window");
        assert_eq!(frames[2]["render"][1]["status"], "active");
        // Повторный одинаковый пуш ничего не выводит, последний пуш съеден блокировкой
        assert_eq!(frames[3], json!({"status": {"index": 0, "status": "active"}}));
        assert_eq!(frames[4], json!({"action": "focus_app_by_command", "command": "firefox"}));
        assert_eq!(frames.len(), 5);
    }

    #[tokio::test]
    async fn test_malformed_lines_are_skipped() {
        let mut config = Config::default();
        config.bridge.request_on_start = false;

        let input = concat!(
            "garbage\n",
            "\n",
            r#"{"event":"dock_data","apps":[]}"#, "\n",
        );
        let frames = run_session(config, input.as_bytes()).await;

        assert_eq!(frames, vec![json!({"render": []})]);
    }

    #[tokio::test]
    async fn test_non_utf8_line_does_not_stop_bridge() {
        let mut config = Config::default();
        config.bridge.request_on_start = false;

        let input = b"\xff\xfe garbage\n{\"event\":\"dock_data\",\"apps\":[]}\r\n";
        let frames = run_session(config, input).await;

        assert_eq!(frames, vec![json!({"render": []})]);
    }

    type HostLines = Lines<BufReader<ReadHalf<DuplexStream>>>;

    fn timed_config() -> Config {
        let mut config = Config::default();
        config.bridge.request_on_start = false;
        config.dock.debounce_ms = 100;
        config
    }

    async fn send(writer: &mut WriteHalf<DuplexStream>, line: &str) {
        writer.write_all(line.as_bytes()).await.unwrap();
        writer.write_all(b"\n").await.unwrap();
    }

    async fn next_frame(lines: &mut HostLines) -> Option<Value> {
        timeout(Duration::from_secs(2), lines.next_line())
            .await
            .unwrap()
            .unwrap()
            .map(|line| serde_json::from_str(&line).unwrap())
    }

    const DOCK_DATA: &str = r#"{"event":"dock_data","apps":[{"name":"Firefox","icon":"firefox","exec":"firefox"}]}"#;
    const FIREFOX_RUNNING: &str = r#"{"event":"running_windows","windows":[{"handle":1,"class":"Firefox"}]}"#;
    const FIREFOX_FOCUSED: &str = r#"{"event":"running_windows","windows":[{"handle":1,"class":"Firefox","focused":true}]}"#;
    const CLICK_FIRST: &str = r#"{"event":"click","index":0}"#;

    async fn click_running_firefox(writer: &mut WriteHalf<DuplexStream>, lines: &mut HostLines) {
        send(writer, DOCK_DATA).await;
        assert_eq!(next_frame(lines).await.unwrap()["render"][0]["status"], "none");
        send(writer, FIREFOX_RUNNING).await;
        assert_eq!(next_frame(lines).await.unwrap()["render"][0]["status"], "running");
        send(writer, CLICK_FIRST).await;
        assert_eq!(next_frame(lines).await.unwrap()["status"]["status"], "active");
        assert_eq!(next_frame(lines).await.unwrap()["action"], "focus_app_by_command");
    }

    #[tokio::test]
    async fn test_lock_released_by_timer_without_input() {
        let mut bridge = StdioBridge::new(Arc::new(timed_config())).unwrap();
        let (host, dock) = duplex(4096);
        let (dock_read, dock_write) = split(dock);
        let (host_read, mut host_write) = split(host);

        let serve = bridge.serve(BufReader::new(dock_read), dock_write);
        let host_side = async move {
            let mut lines = BufReader::new(host_read).lines();
            click_running_firefox(&mut host_write, &mut lines).await;

            // Хост молчит дольше интервала блокировки
            sleep(Duration::from_millis(300)).await;
            host_write.shutdown().await.unwrap();
            assert_eq!(next_frame(&mut lines).await, None);
        };

        let (served, ()) = tokio::join!(serve, host_side);
        served.unwrap();

        // Снять блокировку мог только таймер цикла: после клика пушей не было
        assert_eq!(bridge.engine.lock_deadline(), None);
    }

    #[tokio::test]
    async fn test_push_during_lock_dropped_then_applied_after_release() {
        let mut bridge = StdioBridge::new(Arc::new(timed_config())).unwrap();
        let (host, dock) = duplex(4096);
        let (dock_read, dock_write) = split(dock);
        let (host_read, mut host_write) = split(host);

        let serve = bridge.serve(BufReader::new(dock_read), dock_write);
        let host_side = async move {
            let mut lines = BufReader::new(host_read).lines();
            click_running_firefox(&mut host_write, &mut lines).await;

            // Съеден блокировкой: кадра со статусом none быть не должно
            send(&mut host_write, r#"{"event":"running_windows","windows":[]}"#).await;
            sleep(Duration::from_millis(300)).await;

            // Первый кадр после снятия отражает уже новый пуш
            send(&mut host_write, FIREFOX_FOCUSED).await;
            let frame = next_frame(&mut lines).await.unwrap();
            assert_eq!(frame["render"][0]["status"], "active");

            host_write.shutdown().await.unwrap();
            assert_eq!(next_frame(&mut lines).await, None);
        };

        let (served, ()) = tokio::join!(serve, host_side);
        served.unwrap();
    }
}
