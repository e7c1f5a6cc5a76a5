// End-to-end sessions against a live server on loopback

#[cfg(test)]
mod tests {
    use crate::config::{Config, UserConfig};
    use crate::core_network::network::serve;
    use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
    use std::sync::Arc;
    use tempfile::TempDir;
    use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
    use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
    use tokio::net::{TcpListener, TcpStream};

    struct Client {
        reader: BufReader<OwnedReadHalf>,
        writer: OwnedWriteHalf,
    }

    impl Client {
        async fn connect(addr: SocketAddr) -> Self {
            let stream = TcpStream::connect(addr).await.unwrap();
            let (reader, writer) = stream.into_split();
            let mut client = Self {
                reader: BufReader::new(reader),
                writer,
            };
            assert!(client.reply().await.starts_with("220 "));
            client
        }

        async fn send(&mut self, line: &str) {
            self.writer
                .write_all(format!("{}\r\n", line).as_bytes())
                .await
                .unwrap();
        }

        /// Next reply line, or an empty string once the server hung up.
        async fn reply(&mut self) -> String {
            let mut line = String::new();
            self.reader.read_line(&mut line).await.unwrap();
            line
        }

        async fn command(&mut self, line: &str) -> String {
            self.send(line).await;
            self.reply().await
        }

        /// Sends PASV and returns the advertised data address.
        async fn pasv(&mut self) -> SocketAddr {
            let reply = self.command("PASV").await;
            assert!(reply.starts_with("227 "), "unexpected reply {}", reply);
            parse_pasv_reply(&reply)
        }
    }

    fn parse_pasv_reply(reply: &str) -> SocketAddr {
        let start = reply.find('(').unwrap() + 1;
        let end = reply.find(')').unwrap();
        let fields: Vec<u16> = reply[start..end]
            .split(',')
            .map(|field| field.parse().unwrap())
            .collect();
        let ip = Ipv4Addr::new(
            fields[0] as u8,
            fields[1] as u8,
            fields[2] as u8,
            fields[3] as u8,
        );
        SocketAddr::V4(SocketAddrV4::new(ip, fields[4] * 256 + fields[5]))
    }

    async fn start_server(home: &TempDir) -> SocketAddr {
        let mut config = Config::default();
        config.users.insert(
            "anonymous".to_string(),
            UserConfig {
                password: String::new(),
                home_dir: home.path().to_path_buf(),
            },
        );
        config.users.insert(
            "bob".to_string(),
            UserConfig {
                password: "secret".to_string(),
                home_dir: home.path().to_path_buf(),
            },
        );

        let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(serve(listener, Arc::new(config)));
        addr
    }

    #[tokio::test]
    async fn test_anonymous_passive_list() {
        let home = TempDir::new().unwrap();
        std::fs::write(home.path().join("readme.txt"), b"hello").unwrap();
        std::fs::create_dir(home.path().join("pub")).unwrap();
        let addr = start_server(&home).await;

        let mut client = Client::connect(addr).await;
        assert!(client.command("USER anonymous").await.starts_with("230 "));

        let data_addr = client.pasv().await;
        let mut data = TcpStream::connect(data_addr).await.unwrap();

        assert!(client.command("LIST").await.starts_with("125 "));
        let mut listing = String::new();
        data.read_to_string(&mut listing).await.unwrap();
        assert!(client.reply().await.starts_with("226 "));

        let lines: Vec<&str> = listing.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with('d') && lines[0].ends_with(" pub"));
        assert!(lines[1].starts_with('-') && lines[1].ends_with(" readme.txt"));
        assert!(lines[1].contains(" 5 "));
    }

    #[tokio::test]
    async fn test_wrong_password_closes_connection() {
        let home = TempDir::new().unwrap();
        let addr = start_server(&home).await;

        let mut client = Client::connect(addr).await;
        assert!(client.command("USER bob").await.starts_with("331 "));
        assert!(client.command("PASS wrong").await.starts_with("530 "));
        assert_eq!(client.reply().await, "");
    }

    #[tokio::test]
    async fn test_unknown_user_closes_connection() {
        let home = TempDir::new().unwrap();
        let addr = start_server(&home).await;

        let mut client = Client::connect(addr).await;
        assert!(client.command("USER mallory").await.starts_with("550 "));
        assert_eq!(client.reply().await, "");
    }

    #[tokio::test]
    async fn test_not_logged_in_keeps_session() {
        let home = TempDir::new().unwrap();
        let addr = start_server(&home).await;

        let mut client = Client::connect(addr).await;
        assert!(client.command("PWD").await.starts_with("530 "));
        assert!(client.command("LIST").await.starts_with("530 "));
        assert!(client.command("USER bob").await.starts_with("331 "));
        assert!(client.command("PASS secret").await.starts_with("230 "));
        assert_eq!(
            client.command("PWD").await,
            "257 \"/\" is the current directory\r\n"
        );
    }

    #[tokio::test]
    async fn test_store_then_retrieve() {
        let home = TempDir::new().unwrap();
        let addr = start_server(&home).await;
        let payload: Vec<u8> = (0..200_000u32).map(|i| (i % 253) as u8).collect();

        let mut client = Client::connect(addr).await;
        client.command("USER bob").await;
        assert!(client.command("PASS secret").await.starts_with("230 "));
        assert!(client.command("TYPE I").await.starts_with("200 "));

        let data_addr = client.pasv().await;
        let mut data = TcpStream::connect(data_addr).await.unwrap();
        assert!(client.command("STOR /x.txt").await.starts_with("125 "));
        data.write_all(&payload).await.unwrap();
        data.shutdown().await.unwrap();
        drop(data);
        assert!(client.reply().await.starts_with("226 "));
        assert_eq!(std::fs::read(home.path().join("x.txt")).unwrap(), payload);

        let data_addr = client.pasv().await;
        let mut data = TcpStream::connect(data_addr).await.unwrap();
        assert!(client.command("RETR /x.txt").await.starts_with("125 "));
        let mut received = Vec::new();
        data.read_to_end(&mut received).await.unwrap();
        assert!(client.reply().await.starts_with("226 "));
        assert_eq!(received, payload);
    }

    #[tokio::test]
    async fn test_passive_mode_persists_across_transfers() {
        let home = TempDir::new().unwrap();
        std::fs::write(home.path().join("a.txt"), b"first").unwrap();
        let addr = start_server(&home).await;

        let mut client = Client::connect(addr).await;
        client.command("USER anonymous").await;
        let data_addr = client.pasv().await;

        for _ in 0..2 {
            let mut data = TcpStream::connect(data_addr).await.unwrap();
            assert!(client.command("RETR a.txt").await.starts_with("125 "));
            let mut received = Vec::new();
            data.read_to_end(&mut received).await.unwrap();
            assert!(client.reply().await.starts_with("226 "));
            assert_eq!(received, b"first");
        }
    }

    #[tokio::test]
    async fn test_retr_missing_file() {
        let home = TempDir::new().unwrap();
        let addr = start_server(&home).await;

        let mut client = Client::connect(addr).await;
        client.command("USER anonymous").await;
        let data_addr = client.pasv().await;
        let mut data = TcpStream::connect(data_addr).await.unwrap();

        assert!(client.command("RETR missing.txt").await.starts_with("125 "));
        let mut received = Vec::new();
        data.read_to_end(&mut received).await.unwrap();
        assert!(received.is_empty());
        assert!(client.reply().await.starts_with("450 "));
        assert!(client.command("NOOP").await.starts_with("200 "));
    }

    #[tokio::test]
    async fn test_retr_aborted_by_client() {
        let home = TempDir::new().unwrap();
        // Larger than loopback socket buffers so the server is still writing.
        std::fs::write(home.path().join("big.bin"), vec![0x5a; 32 * 1024 * 1024]).unwrap();
        let addr = start_server(&home).await;

        let mut client = Client::connect(addr).await;
        client.command("USER anonymous").await;
        let data_addr = client.pasv().await;
        let mut data = TcpStream::connect(data_addr).await.unwrap();

        assert!(client.command("RETR big.bin").await.starts_with("125 "));
        let mut first = [0u8; 4096];
        data.read_exact(&mut first).await.unwrap();
        // Closing with unread data pending resets the connection.
        drop(data);

        assert!(client.reply().await.starts_with("451 "));
        assert!(client.command("NOOP").await.starts_with("200 "));
    }

    #[tokio::test]
    async fn test_active_mode_list() {
        let home = TempDir::new().unwrap();
        std::fs::write(home.path().join("active.txt"), b"x").unwrap();
        let addr = start_server(&home).await;

        let mut client = Client::connect(addr).await;
        client.command("USER anonymous").await;

        let data_listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await.unwrap();
        let port = data_listener.local_addr().unwrap().port();
        let reply = client
            .command(&format!("PORT 127,0,0,1,{},{}", port >> 8, port & 0xFF))
            .await;
        assert!(reply.starts_with("200 "));

        client.send("LIST").await;
        let (mut data, _) = data_listener.accept().await.unwrap();
        assert!(client.reply().await.starts_with("125 "));
        let mut listing = String::new();
        data.read_to_string(&mut listing).await.unwrap();
        assert!(client.reply().await.starts_with("226 "));
        assert!(listing.trim_end().ends_with(" active.txt"));
    }

    #[tokio::test]
    async fn test_bad_port_then_unknown_command() {
        let home = TempDir::new().unwrap();
        let addr = start_server(&home).await;

        let mut client = Client::connect(addr).await;
        client.command("USER anonymous").await;
        assert!(client.command("PORT 1,2,3").await.starts_with("501 "));
        assert!(client.command("LIST").await.starts_with("425 "));
        assert!(client.command("FEAT").await.starts_with("500 "));
        assert!(client.command("SYST").await.starts_with("215 "));
    }

    #[tokio::test]
    async fn test_mkd_and_navigation() {
        let home = TempDir::new().unwrap();
        let addr = start_server(&home).await;

        let mut client = Client::connect(addr).await;
        client.command("USER anonymous").await;
        assert_eq!(
            client.command("MKD /newdir").await,
            "257 \"/newdir\" directory created\r\n"
        );
        assert_eq!(
            client.command("MKD /newdir").await,
            "500 Folder is already existed\r\n"
        );
        assert!(client.command("CWD newdir").await.starts_with("250 "));
        assert!(client
            .command("PWD")
            .await
            .starts_with("257 \"/newdir\""));
        assert!(client.command("CWD ../../..").await.starts_with("250 "));
        assert!(client.command("PWD").await.starts_with("257 \"/\""));
    }

    #[tokio::test]
    async fn test_quit_and_empty_line() {
        let home = TempDir::new().unwrap();
        let addr = start_server(&home).await;

        let mut client = Client::connect(addr).await;
        client.command("USER anonymous").await;
        assert!(client.command("QUIT").await.starts_with("221 "));
        assert_eq!(client.reply().await, "");

        let mut client = Client::connect(addr).await;
        client.send("").await;
        assert_eq!(client.reply().await, "");
    }
}
