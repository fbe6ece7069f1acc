use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use colored::Colorize;
use log::error;

use cistrings::parse::orbital_space::parse_orbital_space;
use cistrings::{
    BuildMode, CoreOrdering, ListFamily, RequiredLists, Spin, StringListError, StringLists,
    StringListsConfig,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Lists {
    One,
    Vovo,
    Vvoo,
    All,
}

impl From<Lists> for RequiredLists {
    fn from(lists: Lists) -> Self {
        match lists {
            Lists::One => RequiredLists::OneSubstitution,
            Lists::Vovo => RequiredLists::TwoSubstitutionVOVO,
            Lists::Vvoo => RequiredLists::TwoSubstitutionVVOO,
            Lists::All => RequiredLists::AllSubstitutions,
        }
    }
}

/// Builds the substitution lists of an orbital space and prints their size.
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Orbital space definition, csv with header `mo,irrep,kind`.
    orbitals: PathBuf,

    /// Number of alpha electrons in the correlated orbitals.
    #[arg(long)]
    na: usize,

    /// Number of beta electrons in the correlated orbitals.
    #[arg(long)]
    nb: usize,

    /// Substitution lists to build besides VO and OO.
    #[arg(short, long, value_enum, default_value = "one")]
    lists: Lists,

    /// Size of the construction thread pool.
    #[arg(short, long)]
    threads: Option<usize>,

    /// Build the lists on first lookup.
    #[arg(long)]
    lazy: bool,

    /// Core orbitals at their global position in the sign convention.
    #[arg(long)]
    global_core: bool,

    /// Show a progress bar while building the lists.
    #[arg(long)]
    progress: bool,
}

fn run(cli: &Cli) -> Result<(), StringListError> {
    let space = parse_orbital_space(&cli.orbitals)?;
    let config = StringListsConfig {
        required_lists: cli.lists.into(),
        build_mode: if cli.lazy { BuildMode::Lazy } else { BuildMode::Eager },
        core_ordering: if cli.global_core { CoreOrdering::Global } else { CoreOrdering::Leading },
        nthreads: cli.threads,
        show_progress: cli.progress,
    };
    let lists = StringLists::new(config, &space.cmopi, &space.core_mo, &space.cmo_to_mo, cli.na, cli.nb)?;

    println!("{}", "Orbital space".bold());
    println!("    irreps          {}", lists.nirrep());
    println!("    core            {:?}", lists.fomo_to_mo());
    println!("    cmopi           {:?}", lists.cmopi());
    for spin in [Spin::Up, Spin::Down] {
        let graph = lists.graph(spin);
        println!(
            "{} {} strings, {} electrons in {} orbitals",
            format!("{}", spin).bold(),
            graph.nstr().to_string().green(),
            graph.nones(),
            graph.nbits()
        );
        println!("    per irrep       {:?}", graph.strpi());
    }
    for h in 0..lists.nirrep() {
        println!("Determinants of irrep {}: {}", h, lists.nfcidets(h)?.to_string().green());
    }

    let n = lists.ncmo();
    let nirrep = lists.nirrep();
    for spin in [Spin::Up, Spin::Down] {
        let mut vo = 0;
        let mut oo = 0;
        let mut vovo = 0;
        let mut vvoo = 0;
        for h in 0..nirrep {
            for p in 0..n {
                for q in 0..n {
                    vo += lists.vo_list(spin, p, q, h)?.len();
                }
            }
            for pq_sym in 0..nirrep {
                for pq in 0..lists.pairpi(pq_sym) {
                    oo += lists.oo_list(spin, pq_sym, pq, h)?.len();
                }
            }
        }
        let required = lists.required_lists();
        if required.has_vovo() {
            vovo = count_double(&lists, spin, ListFamily::VOVO)?;
        }
        if required.has_vvoo() {
            vvoo = count_double(&lists, spin, ListFamily::VVOO)?;
        }
        println!(
            "{} substitutions: VO {}, OO {}, VOVO {}, VVOO {}",
            spin, vo, oo, vovo, vvoo
        );
    }

    let timings = lists.timings();
    println!("{}", "Timings".bold());
    println!("    NN              {:.3} s", timings.nn.as_secs_f64());
    println!("    VO              {:.3} s", timings.vo.as_secs_f64());
    println!("    OO              {:.3} s", timings.oo.as_secs_f64());
    println!("    VOVO            {:.3} s", timings.vovo.as_secs_f64());
    println!("    VVOO            {:.3} s", timings.vvoo.as_secs_f64());
    Ok(())
}

fn count_double(lists: &StringLists, spin: Spin, family: ListFamily) -> Result<usize, StringListError> {
    let n = lists.ncmo();
    let mut count = 0;
    for h in 0..lists.nirrep() {
        for p in 0..n {
            for q in 0..n {
                for r in 0..n {
                    for s in 0..n {
                        count += match family {
                            ListFamily::VOVO => lists.vovo_list(spin, p, q, r, s, h)?.len(),
                            _ => lists.vvoo_list(spin, p, q, r, s, h)?.len(),
                        };
                    }
                }
            }
        }
    }
    Ok(count)
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            eprintln!("{} {}", "error:".red().bold(), err);
            ExitCode::FAILURE
        }
    }
}
