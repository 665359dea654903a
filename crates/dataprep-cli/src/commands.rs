//! Command execution: one fresh session per invocation.

use serde_json::to_string_pretty;

use dataprep_engine::{CleanOptions, DataSession, PlotKind};
use dataprep_model::Result;
use dataprep_train::ModelTrainer;

use crate::cli::{CleanArgs, FileArgs, PlotArgs, PlotKindArg, TrainArgs};

fn print_json(value: &impl serde::Serialize) -> Result<()> {
    let json = to_string_pretty(value)
        .map_err(|error| dataprep_model::EngineError::processing("serialize output", error))?;
    println!("{json}");
    Ok(())
}

pub fn run_info(args: &FileArgs) -> Result<()> {
    let mut session = DataSession::new();
    let info = session.load_path(&args.file)?;
    print_json(&info)
}

pub fn run_profile(args: &FileArgs) -> Result<()> {
    let mut session = DataSession::new();
    session.load_path(&args.file)?;
    let profile = session.profile()?;
    print_json(&profile)
}

pub fn run_clean(args: &CleanArgs) -> Result<()> {
    let mut session = DataSession::new();
    session.load_path(&args.file)?;
    let options = CleanOptions {
        drop_nulls: args.drop_nulls,
        drop_duplicates: args.drop_duplicates,
        columns_to_drop: args.drop_columns.clone(),
    };
    let info = session.clean(&options)?;
    print_json(&info)
}

pub fn run_plot(args: &PlotArgs) -> Result<()> {
    let mut session = DataSession::new();
    session.load_path(&args.file)?;
    let kind = match args.kind {
        PlotKindArg::Histogram => PlotKind::Histogram,
        PlotKindArg::Scatter => PlotKind::Scatter,
    };
    let plot = session.plot(kind, &args.x, args.y.as_deref())?;
    print_json(&plot)
}

pub fn run_train(args: &TrainArgs) -> Result<()> {
    let dataset = dataprep_ingest::load_dataset(&args.file)?;
    let mut trainer = ModelTrainer::new();
    trainer.set_dataset(dataset);
    let result = trainer.train(&args.features, &args.target, args.test_size)?;
    print_json(&result)
}
