#[derive(Eq, Hash, PartialEq, Debug, Clone, Copy)]
pub enum FtpCommand {
    USER,
    PASS,
    QUIT,
    PWD,
    XPWD,
    LIST,
    CWD,
    XCWD,
    CDUP,
    NOOP,
    MKD,
    XMKD,
    RMD,
    DELE,
    RNFR,
    RNTO,
    RETR,
    STOR,
    PORT,
    PASV,
    SYST,
    TYPE,
}

impl FtpCommand {
    pub fn from_verb(cmd: &str) -> Option<FtpCommand> {
        match cmd.to_ascii_uppercase().as_str() {
            "USER" => Some(FtpCommand::USER),
            "PASS" => Some(FtpCommand::PASS),
            "QUIT" => Some(FtpCommand::QUIT),
            "PWD" => Some(FtpCommand::PWD),
            "XPWD" => Some(FtpCommand::XPWD),
            "LIST" => Some(FtpCommand::LIST),
            "CWD" => Some(FtpCommand::CWD),
            "XCWD" => Some(FtpCommand::XCWD),
            "CDUP" => Some(FtpCommand::CDUP),
            "NOOP" => Some(FtpCommand::NOOP),
            "MKD" => Some(FtpCommand::MKD),
            "XMKD" => Some(FtpCommand::XMKD),
            "RMD" => Some(FtpCommand::RMD),
            "DELE" => Some(FtpCommand::DELE),
            "RNFR" => Some(FtpCommand::RNFR),
            "RNTO" => Some(FtpCommand::RNTO),
            "RETR" => Some(FtpCommand::RETR),
            "STOR" => Some(FtpCommand::STOR),
            "PORT" => Some(FtpCommand::PORT),
            "PASV" => Some(FtpCommand::PASV),
            "SYST" => Some(FtpCommand::SYST),
            "TYPE" => Some(FtpCommand::TYPE),
            _ => None,
        }
    }

    /// Everything but USER and PASS is refused before login.
    pub fn requires_login(self) -> bool {
        !matches!(self, FtpCommand::USER | FtpCommand::PASS)
    }
}

/// Splits a control line into an upper-cased verb and its argument.
///
/// The argument is the rest of the line after the first run of whitespace,
/// so file names containing spaces survive. Returns `None` for a line with
/// no tokens at all, which ends the session.
pub fn parse_command_line(line: &str) -> Option<(String, String)> {
    let line = line.trim_end_matches(['\r', '\n']).trim_start();
    if line.is_empty() {
        return None;
    }

    let (verb, arg) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim_start()),
        None => (line, ""),
    };
    Some((verb.to_ascii_uppercase(), arg.to_string()))
}
