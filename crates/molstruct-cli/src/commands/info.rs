use crate::cli::InfoArgs;
use crate::error::Result;
use molstruct::core::io::pdb::{PdbFile, PdbMetadata};
use molstruct::core::io::traits::StructureFile;
use molstruct::core::models::structure::Structure;
use tracing::info;

pub fn run(args: InfoArgs) -> Result<()> {
    info!("Reading structure from '{}'.", args.input.display());
    let (structure, metadata) = PdbFile::read_from_path(&args.input)?;

    print_summary(&structure, &metadata);
    if args.metadata {
        print_metadata(&metadata);
    }
    Ok(())
}

fn print_summary(structure: &Structure, metadata: &PdbMetadata) {
    println!("Atoms:    {}", structure.atom_count());
    println!("Residues: {}", structure.residue_count());
    println!("Models:   {}", metadata.pdbxyz.len());

    if let Some([a, b, c, alpha, beta, gamma]) = structure.box_dimensions {
        println!("Box:      {a:.3} {b:.3} {c:.3}  {alpha:.2} {beta:.2} {gamma:.2}");
    }

    let chains: Vec<String> = {
        let mut seen = Vec::new();
        for (_, residue) in structure.residues_iter() {
            if !residue.chain.is_empty() && !seen.contains(&residue.chain) {
                seen.push(residue.chain.clone());
            }
        }
        seen
    };
    if !chains.is_empty() {
        println!("Chains:   {}", chains.join(" "));
    }
}

fn print_metadata(metadata: &PdbMetadata) {
    if !metadata.experimental.is_empty() {
        println!("Experimental: {}", metadata.experimental);
    }
    if !metadata.authors.is_empty() {
        println!("Authors:      {}", metadata.authors);
    }
    if !metadata.title.is_empty() {
        println!("Title:        {}", metadata.title);
    }
    if !metadata.journal.is_empty() {
        let mut citation = metadata.journal.clone();
        if !metadata.volume.is_empty() {
            citation += &format!(" v. {}", metadata.volume);
        }
        if !metadata.page.is_empty() {
            citation += &format!(" p. {}", metadata.page);
        }
        if let Some(year) = metadata.year {
            citation += &format!(" ({year})");
        }
        println!("Journal:      {citation}");
    }
    if !metadata.journal_authors.is_empty() {
        println!("Ref. authors: {}", metadata.journal_authors);
    }
    if !metadata.doi.is_empty() {
        println!("DOI:          {}", metadata.doi);
    }
    if !metadata.pmid.is_empty() {
        println!("PMID:         {}", metadata.pmid);
    }
    if !metadata.keywords.is_empty() {
        println!("Keywords:     {}", metadata.keywords.join(", "));
    }
    for (id, db) in &metadata.related_entries {
        println!("Related:      {id} ({db})");
    }
}
