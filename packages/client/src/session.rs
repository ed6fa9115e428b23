//! Client session: one TCP connection, a receive task and a send task.

use std::{
    io::Write,
    net::{IpAddr, SocketAddr},
};

use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::{
    io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt},
    net::TcpStream,
    sync::mpsc,
};

use super::{
    domain::{is_quit_command, is_sendable},
    error::ClientError,
    ui::{MESSAGE_PROMPT, NAME_PROMPT, print_received},
};

/// Size of the buffer used for each read from the server
pub const READ_BUFFER_SIZE: usize = 256;

/// How the send side of a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// The user typed `quit`
    Quit,
    /// Input ended (Ctrl+C / Ctrl+D)
    InputClosed,
}

/// Print every chunk received from the server until it closes the connection.
pub async fn receive_loop<R, W>(mut reader: R, mut out: W) -> Result<(), ClientError>
where
    R: AsyncRead + Unpin,
    W: Write,
{
    let mut buf = vec![0u8; READ_BUFFER_SIZE];
    loop {
        let n = reader.read(&mut buf).await?;
        if n == 0 {
            tracing::info!("Connection closed by the server.");
            return Ok(());
        }
        print_received(&mut out, &buf[..n]);
    }
}

/// Forward input lines to the server until `quit` or the end of input.
///
/// Lines are written as raw bytes without a delimiter. The write side is shut
/// down before returning so the server sees a clean close.
pub async fn send_loop<W>(
    mut writer: W,
    mut input_rx: mpsc::UnboundedReceiver<String>,
) -> Result<SendOutcome, ClientError>
where
    W: AsyncWrite + Unpin,
{
    let mut outcome = SendOutcome::InputClosed;

    while let Some(line) = input_rx.recv().await {
        if is_quit_command(&line) {
            outcome = SendOutcome::Quit;
            break;
        }
        if !is_sendable(&line) {
            continue;
        }
        writer.write_all(line.as_bytes()).await?;
    }

    writer.shutdown().await?;
    Ok(outcome)
}

/// Spawn a blocking thread reading lines with rustyline
fn spawn_readline(input_tx: mpsc::UnboundedSender<String>, ask_name: bool) {
    std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        let mut prompt = if ask_name { NAME_PROMPT } else { MESSAGE_PROMPT };

        loop {
            match rl.readline(prompt) {
                Ok(line) => {
                    if is_sendable(&line) {
                        rl.add_history_entry(line.as_str()).ok();
                        prompt = MESSAGE_PROMPT;
                    }
                    if input_tx.send(line).is_err() {
                        // Channel closed, exit thread
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });
}

/// Run the relay client
///
/// # Arguments
///
/// * `host` / `port` - Server address
/// * `name` - Display name sent as the first payload; when absent the first typed line is the name
pub async fn run_client(host: IpAddr, port: u16, name: Option<String>) -> Result<(), ClientError> {
    let addr = SocketAddr::new(host, port);
    let stream = TcpStream::connect(addr)
        .await
        .map_err(|source| ClientError::Connect { addr, source })?;

    tracing::info!("Connected to relay server at {}", addr);

    let (reader, mut writer) = stream.into_split();

    if let Some(name) = &name {
        writer.write_all(name.as_bytes()).await?;
        println!("\nYou are '{}'.", name);
    } else {
        println!("\nEnter your name first.");
    }
    println!("Type messages and press Enter to send. Type 'quit' to exit.\n");

    let (input_tx, input_rx) = mpsc::unbounded_channel::<String>();
    spawn_readline(input_tx, name.is_none());

    let mut read_task = tokio::spawn(receive_loop(reader, std::io::stdout()));
    let mut write_task = tokio::spawn(send_loop(writer, input_rx));

    // If any one of the tasks completes, abort the other
    tokio::select! {
        read_result = &mut read_task => {
            write_task.abort();
            match read_result {
                Ok(result) => result,
                Err(e) => {
                    tracing::error!("Receive task failed: {}", e);
                    Ok(())
                }
            }
        }
        write_result = &mut write_task => {
            read_task.abort();
            match write_result {
                Ok(Ok(outcome)) => {
                    tracing::info!("Client session ended: {:?}", outcome);
                    Ok(())
                }
                Ok(Err(e)) => Err(e),
                Err(e) => {
                    tracing::error!("Send task failed: {}", e);
                    Ok(())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_send_loop_writes_lines_until_quit() {
        // テスト項目: quit までの行がそのまま送信され、quit で接続が閉じられる
        // given (前提条件):
        let (client_side, mut server_side) = tokio::io::duplex(1024);
        let (input_tx, input_rx) = mpsc::unbounded_channel();
        for line in ["Alice", "hello", "   ", "QUIT", "never sent"] {
            input_tx.send(line.to_string()).unwrap();
        }

        // when (操作):
        let outcome = send_loop(client_side, input_rx).await.unwrap();

        // then (期待する結果):
        assert_eq!(outcome, SendOutcome::Quit);
        let mut received = Vec::new();
        server_side.read_to_end(&mut received).await.unwrap();
        assert_eq!(received, b"Alicehello");
    }

    #[tokio::test]
    async fn test_send_loop_ends_when_input_closes() {
        // テスト項目: 入力が閉じられると InputClosed で終了する
        // given (前提条件):
        let (client_side, mut server_side) = tokio::io::duplex(1024);
        let (input_tx, input_rx) = mpsc::unbounded_channel();
        input_tx.send("bye".to_string()).unwrap();
        drop(input_tx);

        // when (操作):
        let outcome = send_loop(client_side, input_rx).await.unwrap();

        // then (期待する結果):
        assert_eq!(outcome, SendOutcome::InputClosed);
        let mut received = Vec::new();
        server_side.read_to_end(&mut received).await.unwrap();
        assert_eq!(received, b"bye");
    }

    #[tokio::test]
    async fn test_receive_loop_prints_chunks_until_eof() {
        // テスト項目: 受信したデータが表示され、サーバーが閉じると正常終了する
        // given (前提条件):
        let (mut server_side, client_side) = tokio::io::duplex(1024);
        server_side.write_all(b"hi from bob").await.unwrap();
        drop(server_side);
        let mut out = Vec::new();

        // when (操作):
        let result = receive_loop(client_side, &mut out).await;

        // then (期待する結果):
        assert!(result.is_ok());
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("hi from bob"));
    }

    #[tokio::test]
    async fn test_run_client_reports_connection_failure() {
        // テスト項目: サーバーに接続できない場合は Connect エラーになる
        // given (前提条件):
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        // when (操作):
        let result = run_client("127.0.0.1".parse().unwrap(), port, None).await;

        // then (期待する結果):
        assert!(matches!(result, Err(ClientError::Connect { .. })));
    }
}
