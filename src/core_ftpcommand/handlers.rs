use crate::config::Config;
use crate::core_ftpcommand::ftpcommand::FtpCommand;
use crate::core_ftpcommand::{
    cdup, cwd, dele, list, mkd, noop, pass, pwd, quit, retr, rmd, rnfr, rnto, stor, syst, type_,
    user,
};
use crate::core_network::{pasv, port};
use crate::helpers::send_response;
use crate::session::Session;
use log::warn;
use tokio::io::AsyncWrite;

/// Runs one parsed command against the session.
///
/// The login gate is applied here once for every command. An `Err` means the
/// control connection failed and the session must end.
pub async fn dispatch_command<W>(
    writer: &mut W,
    config: &Config,
    session: &mut Session,
    command: FtpCommand,
    arg: String,
) -> Result<(), std::io::Error>
where
    W: AsyncWrite + Unpin,
{
    if command.requires_login() && !session.is_authenticated() {
        warn!("{:?} refused: not logged in", command);
        return send_response(writer, 530, "Not logged in").await;
    }

    // A staged rename source only survives until the very next command.
    if command != FtpCommand::RNTO {
        session.rename_from = None;
    }

    match command {
        FtpCommand::USER => user::handle_user_command(writer, config, session, arg).await,
        FtpCommand::PASS => pass::handle_pass_command(writer, config, session, arg).await,
        FtpCommand::QUIT => quit::handle_quit_command(writer, session).await,
        FtpCommand::PWD | FtpCommand::XPWD => pwd::handle_pwd_command(writer, session).await,
        FtpCommand::CWD | FtpCommand::XCWD => cwd::handle_cwd_command(writer, session, arg).await,
        FtpCommand::CDUP => cdup::handle_cdup_command(writer, session).await,
        FtpCommand::MKD | FtpCommand::XMKD => mkd::handle_mkd_command(writer, session, arg).await,
        FtpCommand::RMD => rmd::handle_rmd_command(writer, session, arg).await,
        FtpCommand::DELE => dele::handle_dele_command(writer, session, arg).await,
        FtpCommand::RNFR => rnfr::handle_rnfr_command(writer, session, arg).await,
        FtpCommand::RNTO => rnto::handle_rnto_command(writer, session, arg).await,
        FtpCommand::LIST => list::handle_list_command(writer, session, arg).await,
        FtpCommand::RETR => retr::handle_retr_command(writer, config, session, arg).await,
        FtpCommand::STOR => stor::handle_stor_command(writer, config, session, arg).await,
        FtpCommand::PORT => port::handle_port_command(writer, session, arg).await,
        FtpCommand::PASV => pasv::handle_pasv_command(writer, config, session).await,
        FtpCommand::TYPE => type_::handle_type_command(writer, arg).await,
        FtpCommand::SYST => syst::handle_syst_command(writer).await,
        FtpCommand::NOOP => noop::handle_noop_command(writer).await,
    }
}
