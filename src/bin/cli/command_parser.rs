use clap::{Arg, Command};

pub fn arg_parser() -> Command {
    Command::new("tomefind")
        .about("Search the Open Library catalog and keep a list of favourite books")
        .multicall(true)
        .subcommand_required(true)
        .subcommand(
            Command::new("search")
                .about("Search books by title, author or keywords")
                .arg(Arg::new("query").required(true).num_args(1..)),
        )
        .subcommand(
            Command::new("show")
                .about("Show a work or book (e.g. OL45804W, OL7353617M)")
                .arg(Arg::new("id").required(true)),
        )
        .subcommand(
            Command::new("author")
                .about("Show an author (e.g. OL34184A)")
                .arg(Arg::new("id").required(true)),
        )
        .subcommand(
            Command::new("favourites")
                .about("Manage favourite books")
                .subcommand_required(true)
                .subcommand(Command::new("list").about("List favourite books"))
                .subcommand(
                    Command::new("add")
                        .about("Add a work or book to the favourites")
                        .arg(Arg::new("id").required(true)),
                )
                .subcommand(
                    Command::new("remove")
                        .about("Remove a favourite by key or id")
                        .arg(Arg::new("key").required(true)),
                )
                .subcommand(
                    Command::new("check")
                        .about("Tell whether a key or id is a favourite")
                        .arg(Arg::new("key").required(true)),
                ),
        )
        .subcommand(Command::new("config").about("Print the default configuration"))
        .subcommand(Command::new("exit").about("Leave the read eval print loop"))
}

pub fn arg_parser_cli() -> Command {
    arg_parser().subcommand(Command::new("repl").about("Launch a read eval print loop"))
}

pub fn generate_completions() -> Vec<String> {
    let cmd = arg_parser();
    fn add_command(parent_fn_name: &str, cmd: &Command, subcmds: &mut Vec<String>) {
        let fn_name = format!("{parent_fn_name} {}", cmd.get_name())
            .trim()
            .to_string();
        subcmds.push(fn_name.clone());
        for subcmd in cmd.get_subcommands() {
            add_command(&fn_name, subcmd, subcmds);
        }
    }
    let mut subcmds = vec![];
    for subcmd in cmd.get_subcommands() {
        add_command("", subcmd, &mut subcmds);
    }
    subcmds.sort();
    subcmds
}
